use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

// Dates and durations travel as opaque strings on the wire, the core never
// interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct EventDate(String);

impl EventDate {
    pub fn new(date: impl Into<String>) -> Self {
        Self(date.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct EventDuration(String);

impl EventDuration {
    pub fn new(duration: impl Into<String>) -> Self {
        Self(duration.into())
    }
}
