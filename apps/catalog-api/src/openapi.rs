//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Item catalog backed by a JSON file, with search, pagination and cached stats",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    nest(
        (path = "/api/items", api = domain_items::ItemsApiDoc),
        (path = "/api/stats", api = domain_items::StatsApiDoc)
    ),
    tags(
        (name = "Items", description = "Catalog items"),
        (name = "Stats", description = "Aggregate statistics")
    )
)]
pub struct ApiDoc;
