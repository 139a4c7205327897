mod capacity;
mod id;
mod info;
mod location;
mod name;
mod schedule;

pub use self::{capacity::*, id::*, info::*, location::*, name::*, schedule::*};
use crate::entity::common::Filter;
use crate::entity::user::UserId;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// A coordinated event with a fixed participant capacity.
///
/// `current_capacity` always equals `people.len()` and never exceeds
/// `capacity`. Both are mutated only by registration transitions, which the
/// store applies as a single conditional update.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Event {
    id: EventId,
    name: EventName,
    info: EventInfo,
    location: EventLocation,
    date: EventDate,
    duration: EventDuration,
    capacity: EventCapacity,
    current_capacity: EventCapacity,
    filters: Vec<Filter>,
    people: Vec<UserId>,
}

impl Event {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EventId,
        name: EventName,
        info: EventInfo,
        location: EventLocation,
        date: EventDate,
        duration: EventDuration,
        capacity: EventCapacity,
        current_capacity: EventCapacity,
        filters: Vec<Filter>,
        people: Vec<UserId>,
    ) -> Self {
        Self {
            id,
            name,
            info,
            location,
            date,
            duration,
            capacity,
            current_capacity,
            filters,
            people,
        }
    }

    /// A freshly created event: nobody registered yet.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: EventId,
        name: EventName,
        info: EventInfo,
        location: EventLocation,
        date: EventDate,
        duration: EventDuration,
        capacity: EventCapacity,
        filters: Vec<Filter>,
    ) -> Self {
        Self::new(
            id,
            name,
            info,
            location,
            date,
            duration,
            capacity,
            EventCapacity::new(0),
            filters,
            Vec::new(),
        )
    }

    pub fn is_full(&self) -> bool {
        self.current_capacity.as_ref() >= self.capacity.as_ref()
    }

    pub fn is_registered(&self, user_id: &UserId) -> bool {
        self.people.contains(user_id)
    }

    /// Number of tags shared with `query`. Zero means the event does not
    /// match at all.
    pub fn match_score(&self, query: &[Filter]) -> usize {
        self.filters
            .iter()
            .filter(|filter| query.contains(filter))
            .count()
    }
}
