//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::{diagnostics, status};

/// Combined OpenAPI documentation for the Lobster API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lobster Air Tawar API",
        version = "0.1.0",
        description = "Freshwater lobster catalog and customer inquiry API"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(status::root, status::hello, status::ready, diagnostics::test_database),
    components(schemas(status::MessageResponse, diagnostics::DiagnosticsReport)),
    nest(
        (path = "/api", api = domain_catalog::ApiDoc)
    ),
    tags(
        (name = "Status", description = "Liveness, readiness and diagnostics")
    )
)]
pub struct ApiDoc;
