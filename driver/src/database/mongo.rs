use error_stack::Report;
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::Client;

use kernel::interface::query::{DependOnEventQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnEventModifier, DependOnUserModifier};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{event::*, user::*};

mod event;
mod user;

static MONGODB_URL: &str = "MONGODB_URL";
static MONGODB_DATABASE: &str = "MONGODB_DATABASE";

pub struct MongoDatabase {
    users: MongoUserRepository,
    events: MongoEventRepository,
}

impl MongoDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(MONGODB_URL)?;
        let name = env(MONGODB_DATABASE)?;
        let options = ClientOptions::parse(&url).await.convert_error()?;
        let client = Client::with_options(options).convert_error()?;
        let database = client.database(&name);
        tracing::debug!("using mongodb database {name}");
        Ok(Self {
            users: MongoUserRepository::new(&database),
            events: MongoEventRepository::new(&database),
        })
    }
}

impl DependOnUserQuery for MongoDatabase {
    type UserQuery = MongoUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &self.users
    }
}

impl DependOnUserModifier for MongoDatabase {
    type UserModifier = MongoUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &self.users
    }
}

impl DependOnEventQuery for MongoDatabase {
    type EventQuery = MongoEventRepository;
    fn event_query(&self) -> &Self::EventQuery {
        &self.events
    }
}

impl DependOnEventModifier for MongoDatabase {
    type EventModifier = MongoEventRepository;
    fn event_modifier(&self) -> &Self::EventModifier {
        &self.events
    }
}

impl<T> ConvertError for Result<T, mongodb::error::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match error.kind.as_ref() {
                ErrorKind::ServerSelection { .. } => KernelError::Timeout,
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl<T> ConvertError for Result<T, mongodb::bson::de::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}

impl<T> ConvertError for Result<T, mongodb::bson::ser::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}
