mod common;
mod event;
mod user;

pub use self::{common::*, event::*, user::*};
