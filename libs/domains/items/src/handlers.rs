use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, JsonBody,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{CreateItem, Item, ItemPage, ItemQuery, Stats};
use crate::repository::ItemRepository;
use crate::service::ItemService;
use crate::stats::StatsService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item),
    components(
        schemas(Item, CreateItem, ItemPage),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Catalog items backed by a JSON file")
    )
)]
pub struct ItemsApiDoc;

/// OpenAPI documentation for Stats API
#[derive(OpenApi)]
#[openapi(
    paths(get_stats),
    components(
        schemas(Stats),
        responses(InternalServerErrorResponse)
    ),
    tags(
        (name = "Stats", description = "Aggregate catalog statistics")
    )
)]
pub struct StatsApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item))
        .with_state(shared_service)
}

/// Create the stats router
pub fn stats_router<R: ItemRepository + 'static>(service: StatsService<R>) -> Router {
    Router::new()
        .route("/", get(get_stats))
        .with_state(Arc::new(service))
}

/// List items, optionally filtered by name, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(ItemQuery),
    responses(
        (status = 200, description = "One page of matching items", body = ItemPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Query(query): Query<ItemQuery>,
) -> ItemResult<Json<ItemPage>> {
    let page = service.list_items(query).await?;
    Ok(Json(page))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    JsonBody(body): JsonBody<Value>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(candidate(body)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Reads a create body as a candidate item. A body that is JSON but not an
/// object (`[]`, `null`, `42`) carries no fields, so it fails on `name`.
fn candidate(body: Value) -> CreateItem {
    match body {
        Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
        _ => CreateItem::default(),
    }
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = u64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Total item count and mean price, served from cache when fresh
#[utoipa::path(
    get,
    path = "",
    tag = "Stats",
    responses(
        (status = 200, description = "Catalog statistics", body = Stats),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_stats<R: ItemRepository>(
    State(service): State<Arc<StatsService<R>>>,
) -> ItemResult<Json<Stats>> {
    let stats = service.get_stats().await?;
    Ok(Json(stats))
}
