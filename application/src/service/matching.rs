use kernel::interface::query::{DependOnEventQuery, EventQuery};
use kernel::prelude::entity::Filter;
use kernel::KernelError;

use crate::transfer::EventDto;

/// Filter-overlap ranking over events.
#[async_trait::async_trait]
pub trait MatchingService: 'static + Sync + Send + DependOnEventQuery {
    /// Events sharing at least one tag with `filters`, best overlap first.
    /// An empty query matches nothing, it never means "match everything".
    async fn match_events(
        &self,
        filters: Vec<String>,
    ) -> error_stack::Result<Vec<EventDto>, KernelError> {
        if filters.is_empty() {
            return Ok(Vec::new());
        }
        let filters: Vec<Filter> = filters.into_iter().map(Filter::new).collect();
        let events = self.event_query().find_by_filters(&filters).await?;
        Ok(events.into_iter().map(EventDto::from).collect())
    }
}

impl<T> MatchingService for T where T: DependOnEventQuery {}
