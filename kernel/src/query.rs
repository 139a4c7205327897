mod event;
mod user;

pub use self::{event::*, user::*};
