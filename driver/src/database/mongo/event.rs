use error_stack::Report;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson};
use mongodb::options::UpdateOptions;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use kernel::interface::query::EventQuery;
use kernel::interface::update::EventModifier;
use kernel::prelude::entity::{
    Event, EventCapacity, EventDate, EventDuration, EventId, EventInfo, EventLocation, EventName,
    Filter, UserId,
};
use kernel::KernelError;

use crate::error::ConvertError;

static EVENTS: &str = "events";

pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub(in crate::database) fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(EVENTS),
        }
    }
}

#[async_trait::async_trait]
impl EventQuery for MongoEventRepository {
    async fn find_by_id(&self, id: &EventId) -> error_stack::Result<Option<Event>, KernelError> {
        let document = self
            .collection
            .find_one(doc! { "eventId": *id.as_ref() }, None)
            .await
            .convert_error()?;
        Ok(document.map(Event::from))
    }

    async fn find_all(&self) -> error_stack::Result<Vec<Event>, KernelError> {
        let mut cursor = self.collection.find(None, None).await.convert_error()?;
        let mut events = Vec::new();
        while let Some(document) = cursor.try_next().await.convert_error()? {
            events.push(Event::from(document));
        }
        Ok(events)
    }

    async fn find_by_filters(
        &self,
        filters: &[Filter],
    ) -> error_stack::Result<Vec<Event>, KernelError> {
        let query: Vec<Bson> = filters
            .iter()
            .map(|filter| Bson::String(filter.as_ref().clone()))
            .collect();
        // Overlap size ranks the events, descending; equal overlaps order
        // by ascending event id. The ranking field never leaves the store.
        let pipeline = vec![
            doc! { "$match": { "filters": { "$in": query.clone() } } },
            doc! { "$addFields": {
                "matchingCount": {
                    "$size": { "$setIntersection": ["$filters", query] }
                }
            } },
            doc! { "$sort": { "matchingCount": -1, "eventId": 1 } },
            doc! { "$project": { "matchingCount": 0 } },
        ];
        let mut cursor = self
            .collection
            .aggregate(pipeline, None)
            .await
            .convert_error()?;
        let mut events = Vec::new();
        while let Some(document) = cursor.try_next().await.convert_error()? {
            let document: EventDocument =
                mongodb::bson::from_document(document).convert_error()?;
            events.push(Event::from(document));
        }
        Ok(events)
    }
}

#[async_trait::async_trait]
impl EventModifier for MongoEventRepository {
    async fn create(&self, event: &Event) -> error_stack::Result<bool, KernelError> {
        // Insert-if-absent in one round trip: the upsert either materializes
        // the document or matches the existing one and writes nothing.
        let document =
            mongodb::bson::to_document(&EventDocument::from(event)).convert_error()?;
        let result = self
            .collection
            .update_one(
                doc! { "eventId": *event.id().as_ref() },
                doc! { "$setOnInsert": document },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await
            .convert_error()?;
        Ok(result.upserted_id.is_some())
    }

    async fn sign_up(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError> {
        // Membership and capacity preconditions sit in the update filter.
        // The store evaluates them atomically with the push, so concurrent
        // sign-ups cannot both take the last slot.
        let result = self
            .collection
            .update_one(
                doc! {
                    "eventId": *event_id.as_ref(),
                    "people": { "$ne": *user_id.as_ref() },
                    "$expr": { "$lt": ["$currentCapacity", "$capacity"] },
                },
                doc! {
                    "$push": { "people": *user_id.as_ref() },
                    "$inc": { "currentCapacity": 1 },
                },
                None,
            )
            .await
            .convert_error()?;
        if result.modified_count == 1 {
            return Ok(true);
        }
        // Nothing matched: either the event is absent or a precondition
        // failed. Events are never deleted, so a point lookup disambiguates
        // without a race.
        let event = self
            .collection
            .find_one(doc! { "eventId": *event_id.as_ref() }, None)
            .await
            .convert_error()?;
        match event {
            None => Err(Report::new(KernelError::NotFound)),
            Some(_) => Ok(false),
        }
    }

    async fn withdraw(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError> {
        let result = self
            .collection
            .update_one(
                doc! {
                    "eventId": *event_id.as_ref(),
                    "people": *user_id.as_ref(),
                },
                doc! {
                    "$pull": { "people": *user_id.as_ref() },
                    "$inc": { "currentCapacity": -1 },
                },
                None,
            )
            .await
            .convert_error()?;
        Ok(result.modified_count == 1)
    }
}

/// Wire shape of an event document. The storage-internal `_id` is dropped
/// on deserialization.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDocument {
    event_id: i64,
    name: String,
    info: String,
    location: String,
    date: String,
    duration: String,
    capacity: i32,
    current_capacity: i32,
    filters: Vec<String>,
    people: Vec<i64>,
}

impl From<EventDocument> for Event {
    fn from(document: EventDocument) -> Self {
        Event::new(
            EventId::new(document.event_id),
            EventName::new(document.name),
            EventInfo::new(document.info),
            EventLocation::new(document.location),
            EventDate::new(document.date),
            EventDuration::new(document.duration),
            EventCapacity::new(document.capacity),
            EventCapacity::new(document.current_capacity),
            document.filters.into_iter().map(Filter::new).collect(),
            document.people.into_iter().map(UserId::new).collect(),
        )
    }
}

impl From<&Event> for EventDocument {
    fn from(event: &Event) -> Self {
        Self {
            event_id: *event.id().as_ref(),
            name: event.name().as_ref().clone(),
            info: event.info().as_ref().clone(),
            location: event.location().as_ref().clone(),
            date: event.date().as_ref().clone(),
            duration: event.duration().as_ref().clone(),
            capacity: *event.capacity().as_ref(),
            current_capacity: *event.current_capacity().as_ref(),
            filters: event
                .filters()
                .iter()
                .map(|filter| filter.as_ref().clone())
                .collect(),
            people: event.people().iter().map(|id| *id.as_ref()).collect(),
        }
    }
}
