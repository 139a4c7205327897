use crate::entity::{Event, EventId, Filter};
use crate::KernelError;

#[async_trait::async_trait]
pub trait EventQuery: Sync + Send + 'static {
    async fn find_by_id(&self, id: &EventId) -> error_stack::Result<Option<Event>, KernelError>;

    async fn find_all(&self) -> error_stack::Result<Vec<Event>, KernelError>;

    /// Every event sharing at least one tag with `filters`, ordered by
    /// descending overlap size. Equal overlaps order by ascending event id.
    /// Zero-overlap events are excluded, not ranked last.
    async fn find_by_filters(
        &self,
        filters: &[Filter],
    ) -> error_stack::Result<Vec<Event>, KernelError>;
}

pub trait DependOnEventQuery: Sync + Send + 'static {
    type EventQuery: EventQuery;
    fn event_query(&self) -> &Self::EventQuery;
}
