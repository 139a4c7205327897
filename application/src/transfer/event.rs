use kernel::prelude::entity::{DestructEvent, Event};

pub struct GetEventDto {
    pub event_id: i64,
}

pub struct CreateEventDto {
    pub event_id: i64,
    pub name: String,
    pub capacity: i32,
    pub info: String,
    pub filters: Vec<String>,
    pub location: String,
    pub date: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDto {
    pub event_id: i64,
    pub name: String,
    pub info: String,
    pub location: String,
    pub date: String,
    pub duration: String,
    pub capacity: i32,
    pub current_capacity: i32,
    pub filters: Vec<String>,
    pub people: Vec<i64>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        let DestructEvent {
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
        } = event.into_destruct();
        Self {
            event_id: *id.as_ref(),
            name: name.as_ref().clone(),
            info: info.as_ref().clone(),
            location: location.as_ref().clone(),
            date: date.as_ref().clone(),
            duration: duration.as_ref().clone(),
            capacity: *capacity.as_ref(),
            current_capacity: *current_capacity.as_ref(),
            filters: filters
                .into_iter()
                .map(|filter| filter.as_ref().clone())
                .collect(),
            people: people.into_iter().map(|id| *id.as_ref()).collect(),
        }
    }
}
