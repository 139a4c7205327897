use error_stack::Report;
use mongodb::bson::doc;
use mongodb::options::UpdateOptions;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{Filter, User, UserId, UserName};
use kernel::KernelError;

use crate::error::ConvertError;

static USERS: &str = "users";

pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub(in crate::database) fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS),
        }
    }
}

#[async_trait::async_trait]
impl UserQuery for MongoUserRepository {
    async fn find_by_id(&self, id: &UserId) -> error_stack::Result<Option<User>, KernelError> {
        let document = self
            .collection
            .find_one(doc! { "id": *id.as_ref() }, None)
            .await
            .convert_error()?;
        Ok(document.map(User::from))
    }
}

#[async_trait::async_trait]
impl UserModifier for MongoUserRepository {
    async fn create(&self, user: &User) -> error_stack::Result<bool, KernelError> {
        // Insert-if-absent in one round trip: the upsert either materializes
        // the document or matches the existing one and writes nothing.
        let document =
            mongodb::bson::to_document(&UserDocument::from(user)).convert_error()?;
        let result = self
            .collection
            .update_one(
                doc! { "id": *user.id().as_ref() },
                doc! { "$setOnInsert": document },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await
            .convert_error()?;
        Ok(result.upserted_id.is_some())
    }

    async fn add_filter(
        &self,
        id: &UserId,
        filter: &Filter,
    ) -> error_stack::Result<bool, KernelError> {
        // The duplicate check lives in the update filter, so the push and
        // its precondition are one store operation.
        let result = self
            .collection
            .update_one(
                doc! {
                    "id": *id.as_ref(),
                    "filters": { "$ne": filter.as_ref().as_str() },
                },
                doc! { "$push": { "filters": filter.as_ref().as_str() } },
                None,
            )
            .await
            .convert_error()?;
        if result.modified_count == 1 {
            return Ok(true);
        }
        let user = self
            .collection
            .find_one(doc! { "id": *id.as_ref() }, None)
            .await
            .convert_error()?;
        match user {
            None => Err(Report::new(KernelError::NotFound)),
            Some(_) => Ok(false),
        }
    }

    async fn remove_filter(
        &self,
        id: &UserId,
        filter: &Filter,
    ) -> error_stack::Result<bool, KernelError> {
        let result = self
            .collection
            .update_one(
                doc! {
                    "id": *id.as_ref(),
                    "filters": filter.as_ref().as_str(),
                },
                doc! { "$pull": { "filters": filter.as_ref().as_str() } },
                None,
            )
            .await
            .convert_error()?;
        Ok(result.modified_count == 1)
    }
}

/// Wire shape of a user document. The storage-internal `_id` is dropped on
/// deserialization.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    id: i64,
    name: String,
    filters: Vec<String>,
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        User::new(
            UserId::new(document.id),
            UserName::new(document.name),
            document.filters.into_iter().map(Filter::new).collect(),
        )
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_ref(),
            name: user.name().as_ref().clone(),
            filters: user
                .filters()
                .iter()
                .map(|filter| filter.as_ref().clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::query::{DependOnUserQuery, UserQuery};
    use kernel::interface::update::{DependOnUserModifier, UserModifier};
    use kernel::prelude::entity::{Filter, User, UserId, UserName};
    use kernel::KernelError;

    use crate::database::mongo::MongoDatabase;

    #[test_with::env(MONGODB_TEST)]
    #[tokio::test]
    async fn test() -> Result<(), error_stack::Report<KernelError>> {
        let db = MongoDatabase::new().await?;
        let id = UserId::new(i64::from(rand::random::<u32>()));
        let user = User::new(
            id.clone(),
            UserName::new("Alice"),
            vec![Filter::new("music"), Filter::new("sports")],
        );

        assert!(db.user_modifier().create(&user).await?);
        assert!(!db.user_modifier().create(&user).await?);

        let found = db.user_query().find_by_id(&id).await?;
        assert_eq!(found, Some(user));

        let volunteer = Filter::new("volunteer");
        assert!(db.user_modifier().add_filter(&id, &volunteer).await?);
        assert!(!db.user_modifier().add_filter(&id, &volunteer).await?);
        assert!(db.user_modifier().remove_filter(&id, &volunteer).await?);
        assert!(!db.user_modifier().remove_filter(&id, &volunteer).await?);

        Ok(())
    }
}
