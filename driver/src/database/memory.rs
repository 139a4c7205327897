use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use error_stack::Report;

use kernel::interface::query::{DependOnEventQuery, DependOnUserQuery, EventQuery, UserQuery};
use kernel::interface::update::{
    DependOnEventModifier, DependOnUserModifier, EventModifier, UserModifier,
};
use kernel::prelude::entity::{Event, EventCapacity, EventId, Filter, User, UserId};
use kernel::KernelError;

/// Process-local store with the same conditional-update semantics as the
/// MongoDB driver. Each operation holds the map lock across its
/// precondition check and mutation, which gives the per-document atomicity
/// the registration transitions rely on.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    users: Mutex<BTreeMap<i64, User>>,
    events: Mutex<BTreeMap<i64, Event>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> error_stack::Result<MutexGuard<'_, T>, KernelError> {
    mutex
        .lock()
        .map_err(|_| Report::new(KernelError::Internal))
}

#[async_trait::async_trait]
impl UserQuery for InMemoryDatabase {
    async fn find_by_id(&self, id: &UserId) -> error_stack::Result<Option<User>, KernelError> {
        let users = lock(&self.users)?;
        Ok(users.get(id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl UserModifier for InMemoryDatabase {
    async fn create(&self, user: &User) -> error_stack::Result<bool, KernelError> {
        let mut users = lock(&self.users)?;
        let key = *user.id().as_ref();
        if users.contains_key(&key) {
            return Ok(false);
        }
        users.insert(key, user.clone());
        Ok(true)
    }

    async fn add_filter(
        &self,
        id: &UserId,
        filter: &Filter,
    ) -> error_stack::Result<bool, KernelError> {
        let mut users = lock(&self.users)?;
        let user = users
            .get(id.as_ref())
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        if user.filters().contains(filter) {
            return Ok(false);
        }
        let mut destruct = user.clone().into_destruct();
        destruct.filters.push(filter.clone());
        users.insert(
            *id.as_ref(),
            User::new(destruct.id, destruct.name, destruct.filters),
        );
        Ok(true)
    }

    async fn remove_filter(
        &self,
        id: &UserId,
        filter: &Filter,
    ) -> error_stack::Result<bool, KernelError> {
        let mut users = lock(&self.users)?;
        let Some(user) = users.get(id.as_ref()) else {
            return Ok(false);
        };
        if !user.filters().contains(filter) {
            return Ok(false);
        }
        let mut destruct = user.clone().into_destruct();
        destruct.filters.retain(|present| present != filter);
        users.insert(
            *id.as_ref(),
            User::new(destruct.id, destruct.name, destruct.filters),
        );
        Ok(true)
    }
}

#[async_trait::async_trait]
impl EventQuery for InMemoryDatabase {
    async fn find_by_id(&self, id: &EventId) -> error_stack::Result<Option<Event>, KernelError> {
        let events = lock(&self.events)?;
        Ok(events.get(id.as_ref()).cloned())
    }

    async fn find_all(&self) -> error_stack::Result<Vec<Event>, KernelError> {
        let events = lock(&self.events)?;
        Ok(events.values().cloned().collect())
    }

    async fn find_by_filters(
        &self,
        filters: &[Filter],
    ) -> error_stack::Result<Vec<Event>, KernelError> {
        let events = lock(&self.events)?;
        // Same order as the Mongo aggregation: overlap descending, event id
        // ascending on ties. The map already iterates in id order.
        let mut matched: Vec<(usize, Event)> = events
            .values()
            .map(|event| (event.match_score(filters), event.clone()))
            .filter(|(score, _)| *score > 0)
            .collect();
        matched.sort_by(|(left, _), (right, _)| right.cmp(left));
        Ok(matched.into_iter().map(|(_, event)| event).collect())
    }
}

#[async_trait::async_trait]
impl EventModifier for InMemoryDatabase {
    async fn create(&self, event: &Event) -> error_stack::Result<bool, KernelError> {
        let mut events = lock(&self.events)?;
        let key = *event.id().as_ref();
        if events.contains_key(&key) {
            return Ok(false);
        }
        events.insert(key, event.clone());
        Ok(true)
    }

    async fn sign_up(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError> {
        let mut events = lock(&self.events)?;
        let event = events
            .get(event_id.as_ref())
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        if event.is_registered(user_id) || event.is_full() {
            return Ok(false);
        }
        let mut destruct = event.clone().into_destruct();
        destruct.people.push(user_id.clone());
        destruct.current_capacity = EventCapacity::new(destruct.current_capacity.as_ref() + 1);
        events.insert(*event_id.as_ref(), rebuild(destruct));
        Ok(true)
    }

    async fn withdraw(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError> {
        let mut events = lock(&self.events)?;
        let Some(event) = events.get(event_id.as_ref()) else {
            return Ok(false);
        };
        if !event.is_registered(user_id) {
            return Ok(false);
        }
        let mut destruct = event.clone().into_destruct();
        destruct.people.retain(|present| present != user_id);
        destruct.current_capacity = EventCapacity::new(destruct.current_capacity.as_ref() - 1);
        events.insert(*event_id.as_ref(), rebuild(destruct));
        Ok(true)
    }
}

fn rebuild(destruct: kernel::prelude::entity::DestructEvent) -> Event {
    Event::new(
        destruct.id,
        destruct.name,
        destruct.info,
        destruct.location,
        destruct.date,
        destruct.duration,
        destruct.capacity,
        destruct.current_capacity,
        destruct.filters,
        destruct.people,
    )
}

impl DependOnUserQuery for InMemoryDatabase {
    type UserQuery = Self;
    fn user_query(&self) -> &Self::UserQuery {
        self
    }
}

impl DependOnUserModifier for InMemoryDatabase {
    type UserModifier = Self;
    fn user_modifier(&self) -> &Self::UserModifier {
        self
    }
}

impl DependOnEventQuery for InMemoryDatabase {
    type EventQuery = Self;
    fn event_query(&self) -> &Self::EventQuery {
        self
    }
}

impl DependOnEventModifier for InMemoryDatabase {
    type EventModifier = Self;
    fn event_modifier(&self) -> &Self::EventModifier {
        self
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::query::EventQuery;
    use kernel::interface::update::{EventModifier, UserModifier};
    use kernel::prelude::entity::{
        Event, EventCapacity, EventDate, EventDuration, EventId, EventInfo, EventLocation,
        EventName, Filter, User, UserId, UserName,
    };
    use kernel::KernelError;

    use crate::database::InMemoryDatabase;

    fn event(id: i64, capacity: i32, filters: Vec<Filter>) -> Event {
        Event::create(
            EventId::new(id),
            EventName::new("Beach Cleanup"),
            EventInfo::new("Help clean the beach"),
            EventLocation::new("Beach"),
            EventDate::new("2024-06-01"),
            EventDuration::new("3 hours"),
            EventCapacity::new(capacity),
            filters,
        )
    }

    #[tokio::test]
    async fn duplicate_user_creation_declines() -> Result<(), error_stack::Report<KernelError>> {
        let db = InMemoryDatabase::new();
        let user = User::new(UserId::new(1), UserName::new("Alice"), Vec::new());
        assert!(UserModifier::create(&db, &user).await?);
        assert!(!UserModifier::create(&db, &user).await?);
        Ok(())
    }

    #[tokio::test]
    async fn sign_up_keeps_accounting_consistent() -> Result<(), error_stack::Report<KernelError>>
    {
        let db = InMemoryDatabase::new();
        let id = EventId::new(10);
        assert!(EventModifier::create(&db, &event(10, 2, Vec::new())).await?);

        assert!(db.sign_up(&id, &UserId::new(5)).await?);
        assert!(db.sign_up(&id, &UserId::new(6)).await?);
        assert!(!db.sign_up(&id, &UserId::new(7)).await?);

        let stored = db.find_by_id(&id).await?.expect("event must exist");
        assert_eq!(
            *stored.current_capacity().as_ref(),
            stored.people().len() as i32
        );
        assert!(stored.is_full());

        assert!(db.withdraw(&id, &UserId::new(5)).await?);
        let stored = db.find_by_id(&id).await?.expect("event must exist");
        assert_eq!(stored.current_capacity(), &EventCapacity::new(1));
        assert_eq!(stored.people(), &vec![UserId::new(6)]);
        Ok(())
    }

    #[tokio::test]
    async fn sign_up_against_missing_event_fails() {
        let db = InMemoryDatabase::new();
        let result = db.sign_up(&EventId::new(404), &UserId::new(1)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn withdraw_against_missing_event_declines(
    ) -> Result<(), error_stack::Report<KernelError>> {
        let db = InMemoryDatabase::new();
        assert!(!db.withdraw(&EventId::new(404), &UserId::new(1)).await?);
        Ok(())
    }
}
