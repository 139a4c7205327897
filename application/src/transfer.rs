mod event;
mod registration;
mod user;

pub use self::{event::*, registration::*, user::*};
