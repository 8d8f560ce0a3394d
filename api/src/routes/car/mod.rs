use crate::domain::{Car, CarInput, CountFilter, LocationCount, MakeCount, PurchaseValueSummary};
use crate::error::{ApiError, ApiJson, ApiPath, ApiQuery, ErrorResponse};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::persistence::store::CarStore;

#[utoipa::path(
    get,
    path = "/car",
    tag = "cars",
    responses(
        (status = 200, description = "Returns all cars", body = [Car])
    )
)]
pub async fn all(State(store): State<CarStore>) -> Result<Json<Vec<Car>>, ApiError> {
    let cars = store.list().await?;
    Ok(Json(cars.into_iter().map(|c| c.into()).collect()))
}

#[utoipa::path(
    post,
    path = "/car",
    tag = "cars",
    request_body = CarInput,
    responses(
        (status = 201, description = "Returns the created car", body = Car),
        (status = 400, description = "Returns a error when the body is not a car", body = ErrorResponse)
    )
)]
pub async fn create(
    State(store): State<CarStore>,
    ApiJson(input): ApiJson<CarInput>,
) -> Result<(StatusCode, Json<Car>), ApiError> {
    let created = store.create(input.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    post,
    path = "/car/batch",
    tag = "cars",
    request_body = [CarInput],
    responses(
        (status = 201, description = "Returns the ids of the created cars in request order", body = [i32]),
        (status = 400, description = "Returns a error when the body is not a list of cars", body = ErrorResponse)
    )
)]
pub async fn create_batch(
    State(store): State<CarStore>,
    ApiJson(inputs): ApiJson<Vec<CarInput>>,
) -> Result<(StatusCode, Json<Vec<i32>>), ApiError> {
    let ids = store
        .create_many(inputs.into_iter().map(|i| i.into()).collect())
        .await?;
    Ok((StatusCode::CREATED, Json(ids)))
}

#[utoipa::path(
    get,
    path = "/car/{id}",
    tag = "cars",
    params(
        ("id" = i32, Path, description = "The id of the car")
    ),
    responses(
        (status = 200, description = "Returns a car", body = Car),
        (status = 400, description = "Returns a error when id is not an integer", body = ErrorResponse),
        (status = 404, description = "Returns a error when id does not exist", body = ErrorResponse)
    )
)]
pub async fn by_id(
    ApiPath(id): ApiPath<i32>,
    State(store): State<CarStore>,
) -> Result<Json<Car>, ApiError> {
    let car = store.get(id).await?.ok_or(ApiError::CarNotFound(id))?;
    Ok(Json(car.into()))
}

#[utoipa::path(
    put,
    path = "/car/{id}",
    tag = "cars",
    params(
        ("id" = i32, Path, description = "The id of the car")
    ),
    request_body = CarInput,
    responses(
        (status = 200, description = "Returns the replaced car", body = Car),
        (status = 400, description = "Returns a error when id or body is malformed", body = ErrorResponse),
        (status = 404, description = "Returns a error when id does not exist", body = ErrorResponse)
    )
)]
pub async fn update(
    ApiPath(id): ApiPath<i32>,
    State(store): State<CarStore>,
    ApiJson(input): ApiJson<CarInput>,
) -> Result<Json<Car>, ApiError> {
    let car = store
        .update(id, input.into())
        .await?
        .ok_or(ApiError::CarNotFound(id))?;
    Ok(Json(car.into()))
}

#[utoipa::path(
    delete,
    path = "/car/{id}",
    tag = "cars",
    params(
        ("id" = i32, Path, description = "The id of the car")
    ),
    responses(
        (status = 204, description = "The car was deleted"),
        (status = 404, description = "Returns a error when id does not exist", body = ErrorResponse)
    )
)]
pub async fn remove(
    ApiPath(id): ApiPath<i32>,
    State(store): State<CarStore>,
) -> Result<StatusCode, ApiError> {
    if store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::CarNotFound(id))
    }
}

#[utoipa::path(
    get,
    path = "/car/{id}/Odometer",
    tag = "cars",
    params(
        ("id" = i32, Path, description = "The id of the car")
    ),
    responses(
        (status = 200, description = "Returns the odometer accuracy code of a car", body = String),
        (status = 404, description = "Returns a error when id does not exist", body = ErrorResponse)
    )
)]
pub async fn odometer(
    ApiPath(id): ApiPath<i32>,
    State(store): State<CarStore>,
) -> Result<Json<Option<String>>, ApiError> {
    let odometer = store.odometer(id).await?.ok_or(ApiError::CarNotFound(id))?;
    Ok(Json(odometer))
}

#[utoipa::path(
    get,
    path = "/car/PurchVal",
    tag = "car reports",
    responses(
        (status = 200, description = "Returns the average purchase value and the number of cars with one", body = PurchaseValueSummary)
    )
)]
pub async fn purchase_value(
    State(store): State<CarStore>,
) -> Result<Json<PurchaseValueSummary>, ApiError> {
    let stats = store.average_purchase_value().await?;
    Ok(Json(stats.into()))
}

#[utoipa::path(
    get,
    path = "/car/LocationNum",
    tag = "car reports",
    params(CountFilter),
    responses(
        (status = 200, description = "Returns the number of cars per acquiring store", body = [LocationCount]),
        (status = 400, description = "Returns a error when CountAtLeast is not an integer", body = ErrorResponse)
    )
)]
pub async fn count_by_location(
    ApiQuery(filter): ApiQuery<CountFilter>,
    State(store): State<CarStore>,
) -> Result<Json<Vec<LocationCount>>, ApiError> {
    let counts = store.count_by_location(filter.count_at_least).await?;
    Ok(Json(counts.into_iter().map(|c| c.into()).collect()))
}

#[utoipa::path(
    get,
    path = "/car/Make",
    tag = "car reports",
    params(CountFilter),
    responses(
        (status = 200, description = "Returns the number of cars per make", body = [MakeCount]),
        (status = 400, description = "Returns a error when CountAtLeast is not an integer", body = ErrorResponse)
    )
)]
pub async fn count_by_make(
    ApiQuery(filter): ApiQuery<CountFilter>,
    State(store): State<CarStore>,
) -> Result<Json<Vec<MakeCount>>, ApiError> {
    let counts = store.count_by_make(filter.count_at_least).await?;
    Ok(Json(counts.into_iter().map(|c| c.into()).collect()))
}
