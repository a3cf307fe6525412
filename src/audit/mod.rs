mod dto;
pub mod handlers;
mod ingredients;
mod merge;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::audit_routes())
}
