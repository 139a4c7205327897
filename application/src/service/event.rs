use kernel::interface::query::{DependOnEventQuery, EventQuery};
use kernel::interface::update::{DependOnEventModifier, EventModifier};
use kernel::prelude::entity::{
    Event, EventCapacity, EventDate, EventDuration, EventId, EventInfo, EventLocation, EventName,
    Filter,
};
use kernel::KernelError;

use crate::transfer::{CreateEventDto, EventDto, GetEventDto};

#[async_trait::async_trait]
pub trait EventService:
    'static + Sync + Send + DependOnEventQuery + DependOnEventModifier
{
    /// `Ok(false)` when the event id is already taken.
    async fn add_event(&self, dto: CreateEventDto) -> error_stack::Result<bool, KernelError> {
        let event = Event::create(
            EventId::new(dto.event_id),
            EventName::new(dto.name),
            EventInfo::new(dto.info),
            EventLocation::new(dto.location),
            EventDate::new(dto.date),
            EventDuration::new(dto.duration),
            EventCapacity::new(dto.capacity),
            dto.filters.into_iter().map(Filter::new).collect(),
        );
        self.event_modifier().create(&event).await
    }

    async fn get_event(
        &self,
        dto: GetEventDto,
    ) -> error_stack::Result<Option<EventDto>, KernelError> {
        let id = EventId::new(dto.event_id);
        let event = self.event_query().find_by_id(&id).await?;
        Ok(event.map(EventDto::from))
    }

    async fn get_all_events(&self) -> error_stack::Result<Vec<EventDto>, KernelError> {
        let events = self.event_query().find_all().await?;
        Ok(events.into_iter().map(EventDto::from).collect())
    }
}

impl<T> EventService for T where T: DependOnEventQuery + DependOnEventModifier {}
