//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod assets;
pub mod audit;
pub mod depreciation;
pub mod disposals;
pub mod entries;
pub mod health;
pub mod improvements;
pub mod receipts;
pub mod revaluations;
pub mod transfers;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(assets::routes())
        .merge(receipts::routes())
        .merge(disposals::routes())
        .merge(revaluations::routes())
        .merge(improvements::routes())
        .merge(transfers::routes())
        .merge(depreciation::routes())
        .merge(entries::routes())
        .merge(audit::routes())
}
