use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use common::persistence::store::CarStore;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub mod domain;
pub mod error;
pub mod routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::car::all,
        crate::routes::car::create,
        crate::routes::car::create_batch,
        crate::routes::car::by_id,
        crate::routes::car::update,
        crate::routes::car::remove,
        crate::routes::car::odometer,
        crate::routes::car::purchase_value,
        crate::routes::car::count_by_location,
        crate::routes::car::count_by_make,
    ),
    tags(
        (name = "cars", description = "Operations on cars"),
        (name = "car reports", description = "Aggregates over all cars")
    )
)]
pub struct Docs;

pub fn router(store: CarStore) -> Router {
    Router::new()
        .route("/car", get(routes::car::all).post(routes::car::create))
        .route("/car/batch", post(routes::car::create_batch))
        .route("/car/PurchVal", get(routes::car::purchase_value))
        .route("/car/LocationNum", get(routes::car::count_by_location))
        .route("/car/Make", get(routes::car::count_by_make))
        .route(
            "/car/{id}",
            get(routes::car::by_id)
                .put(routes::car::update)
                .delete(routes::car::remove),
        )
        .route("/car/{id}/Odometer", get(routes::car::odometer))
        .route("/swagger/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(Docs::openapi())
}
