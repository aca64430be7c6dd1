use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod reset;
pub(crate) mod validate;

pub fn router() -> Router<AppState> {
    handlers::account_routes()
}
