use serde::Deserialize;
use serde_json::Value;

/// The closed set of operations a client can request. Deserializing the
/// `{action, payload}` envelope straight into this enum is the whole
/// validation layer: unknown actions and missing or mistyped payload
/// fields fail here, before any operation runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "action",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    GetUserById {
        id: i64,
    },
    GetFiltersByUserId {
        id: i64,
    },
    RemoveFilterById {
        id: i64,
        filter: String,
    },
    AddUser {
        id: i64,
        name: String,
        filters: Vec<String>,
    },
    AddFilterById {
        id: i64,
        filter: String,
    },
    GetEventByFilters {
        filters: Vec<String>,
    },
    SignUserToEvent {
        id: i64,
        event_id: i64,
    },
    RemoveUserFromEvent {
        id: i64,
        event_id: i64,
    },
    AddEvent {
        event_id: i64,
        name: String,
        capacity: i32,
        info: String,
        filters: Vec<String>,
        location: String,
        date: String,
        duration: String,
    },
    GetEventById {
        event_id: i64,
    },
    GetAllEvents {},
}

/// Decodes a request body into an [`Action`]. A missing or `null` payload
/// becomes an empty mapping first, matching the transport contract.
pub fn parse_request(mut request: Value) -> Result<Action, serde_json::Error> {
    if let Value::Object(body) = &mut request {
        match body.get("payload") {
            None | Some(Value::Null) => {
                body.insert("payload".to_string(), Value::Object(Default::default()));
            }
            Some(_) => {}
        }
    }
    serde_json::from_value(request)
}
