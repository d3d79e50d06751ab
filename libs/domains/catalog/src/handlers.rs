//! HTTP handlers for the catalog API

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{InternalServerErrorResponse, ValidationErrorResponse},
};
use database::mongodb::DocumentStore;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    Inquiry, InquiryCreated, LobsterProduct, ProductQuery, ProductType, SeedOutcome, SeedRequest,
    StockUnit,
};
use crate::service::{CatalogService, DEFAULT_PRODUCT_LIMIT};

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_inquiry, seed_products),
    components(
        schemas(
            LobsterProduct, ProductType, StockUnit, Inquiry, InquiryCreated,
            SeedRequest, SeedOutcome
        ),
        responses(ValidationErrorResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Lobster product catalog"),
        (name = "Inquiries", description = "Customer lead capture"),
    )
)]
pub struct ApiDoc;

/// Create the catalog router; mount it under `/api`
pub fn router<S: DocumentStore + 'static>(service: CatalogService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products))
        .route("/inquiries", post(create_inquiry))
        .route("/seed", post(seed_products))
        .with_state(shared_service)
}

/// List lobster products in store order
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products that pass validation", body = Vec<LobsterProduct>),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> CatalogResult<Json<Vec<LobsterProduct>>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_PRODUCT_LIMIT);

    let products = service.list_products(limit).await?;
    Ok(Json(products))
}

/// Record a customer inquiry
#[utoipa::path(
    post,
    path = "/inquiries",
    tag = "Inquiries",
    request_body = Inquiry,
    responses(
        (status = 200, description = "Inquiry stored", body = InquiryCreated),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_inquiry<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedJson(inquiry): ValidatedJson<Inquiry>,
) -> CatalogResult<Json<InquiryCreated>> {
    let id = service.create_inquiry(inquiry).await?;
    Ok(Json(InquiryCreated::new(id)))
}

/// Seed the sample catalogue; safe to call repeatedly
#[utoipa::path(
    post,
    path = "/seed",
    tag = "Products",
    request_body = SeedRequest,
    responses(
        (status = 200, description = "Seed result", body = SeedOutcome),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seed_products<S: DocumentStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedJson(request): ValidatedJson<SeedRequest>,
) -> CatalogResult<Json<SeedOutcome>> {
    let outcome = service.seed_products(request.force).await?;
    Ok(Json(outcome))
}
