use application::transfer::{EventDto, UserDto};
use error_stack::ResultExt;
use kernel::KernelError;
use serde::Serialize;
use serde_json::Value;

/// The uniform `{status, data}` envelope every request resolves to. `data`
/// carries the operation result on success and is omitted entirely on
/// errors; no failure detail leaks to the caller.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum ResponseStatus {
    Ok,
    Error,
}

impl ApiResponse {
    pub fn ok(data: impl Serialize) -> error_stack::Result<Self, KernelError> {
        let data = serde_json::to_value(data).change_context(KernelError::Internal)?;
        Ok(Self {
            status: ResponseStatus::Ok,
            data: Some(data),
        })
    }

    /// Empty mapping result, used for point lookups that found nothing.
    pub fn ok_empty() -> Self {
        Self {
            status: ResponseStatus::Ok,
            data: Some(Value::Object(Default::default())),
        }
    }

    pub fn error() -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: i64,
    name: String,
    filters: Vec<String>,
}

impl From<UserDto> for UserResponse {
    fn from(user: UserDto) -> Self {
        Self {
            id: user.id,
            name: user.name,
            filters: user.filters,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
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

impl From<EventDto> for EventResponse {
    fn from(event: EventDto) -> Self {
        Self {
            event_id: event.event_id,
            name: event.name,
            info: event.info,
            location: event.location,
            date: event.date,
            duration: event.duration,
            capacity: event.capacity,
            current_capacity: event.current_capacity,
            filters: event.filters,
            people: event.people,
        }
    }
}
