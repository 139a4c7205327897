use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use crate::dispatch::dispatch;
use crate::handler::AppModule;
use crate::request::parse_request;
use crate::response::ApiResponse;

pub trait ApiRouter {
    fn route_api(self) -> Self;
}

impl ApiRouter for Router<AppModule> {
    fn route_api(self) -> Self {
        self.route(
            "/api",
            post(
                |State(handler): State<AppModule>, Json(request): Json<Value>| async move {
                    let response = match parse_request(request) {
                        Ok(action) => dispatch(handler.database(), action).await,
                        Err(error) => {
                            tracing::warn!("rejected malformed request: {error}");
                            ApiResponse::error()
                        }
                    };
                    Json(response)
                },
            ),
        )
    }
}
