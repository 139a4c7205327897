mod event;
mod matching;
mod registration;
mod user;

pub use self::{event::*, matching::*, registration::*, user::*};
