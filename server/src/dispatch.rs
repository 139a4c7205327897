use application::service::{EventService, MatchingService, RegistrationService, UserService};
use application::transfer::{
    CreateEventDto, CreateUserDto, GetEventDto, GetUserDto, RegistrationDto, UserFilterDto,
};
use kernel::KernelError;

use crate::request::Action;
use crate::response::{ApiResponse, EventResponse, UserResponse};

/// Routes a validated [`Action`] to its operation and folds every outcome
/// into the envelope. This is the sole error boundary: a failing operation
/// is logged and reported as `{status: "error"}`, it never escapes as a
/// transport fault or poisons later requests.
pub async fn dispatch<M>(module: &M, action: Action) -> ApiResponse
where
    M: UserService + EventService + MatchingService + RegistrationService,
{
    match execute(module, action).await {
        Ok(response) => response,
        Err(report) => {
            tracing::error!("request failed: {report:?}");
            ApiResponse::error()
        }
    }
}

async fn execute<M>(module: &M, action: Action) -> error_stack::Result<ApiResponse, KernelError>
where
    M: UserService + EventService + MatchingService + RegistrationService,
{
    match action {
        Action::GetUserById { id } => {
            let user = module.get_user(GetUserDto { id }).await?;
            match user {
                Some(user) => ApiResponse::ok(UserResponse::from(user)),
                None => Ok(ApiResponse::ok_empty()),
            }
        }
        Action::GetFiltersByUserId { id } => {
            let filters = module.get_filters(GetUserDto { id }).await?;
            ApiResponse::ok(filters)
        }
        Action::RemoveFilterById { id, filter } => {
            let removed = module.remove_filter(UserFilterDto { id, filter }).await?;
            ApiResponse::ok(removed)
        }
        Action::AddUser { id, name, filters } => {
            let created = module.add_user(CreateUserDto { id, name, filters }).await?;
            ApiResponse::ok(created)
        }
        Action::AddFilterById { id, filter } => {
            let added = module.add_filter(UserFilterDto { id, filter }).await?;
            ApiResponse::ok(added)
        }
        Action::GetEventByFilters { filters } => {
            let events = module.match_events(filters).await?;
            let events: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
            ApiResponse::ok(events)
        }
        Action::SignUserToEvent { id, event_id } => {
            let signed = module
                .sign_up(RegistrationDto {
                    user_id: id,
                    event_id,
                })
                .await?;
            ApiResponse::ok(signed)
        }
        Action::RemoveUserFromEvent { id, event_id } => {
            let removed = module
                .withdraw(RegistrationDto {
                    user_id: id,
                    event_id,
                })
                .await?;
            ApiResponse::ok(removed)
        }
        // A negative capacity is a malformed request, not a decline.
        Action::AddEvent { capacity, .. } if capacity < 0 => {
            tracing::warn!("rejected addEvent with negative capacity {capacity}");
            Ok(ApiResponse::error())
        }
        Action::AddEvent {
            event_id,
            name,
            capacity,
            info,
            filters,
            location,
            date,
            duration,
        } => {
            let created = module
                .add_event(CreateEventDto {
                    event_id,
                    name,
                    capacity,
                    info,
                    filters,
                    location,
                    date,
                    duration,
                })
                .await?;
            ApiResponse::ok(created)
        }
        Action::GetEventById { event_id } => {
            let event = module.get_event(GetEventDto { event_id }).await?;
            match event {
                Some(event) => ApiResponse::ok(EventResponse::from(event)),
                None => Ok(ApiResponse::ok_empty()),
            }
        }
        Action::GetAllEvents {} => {
            let events = module.get_all_events().await?;
            let events: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
            ApiResponse::ok(events)
        }
    }
}
