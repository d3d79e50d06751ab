use axum_helpers::schema::{FieldReader, Schema};
use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString, VariantNames};
use utoipa::{IntoParams, ToSchema};
use validator::ValidationErrors;

use crate::error::{CatalogError, CatalogResult};

/// Source recorded on an inquiry when the client sends none
pub const DEFAULT_INQUIRY_SOURCE: &str = "website";

/// Kind of lobster on sale
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
    ToSchema,
)]
pub enum ProductType {
    /// Juveniles for grow-out
    #[serde(rename = "benih")]
    #[strum(serialize = "benih")]
    Seed,
    /// Breeding stock
    #[serde(rename = "induk")]
    #[strum(serialize = "induk")]
    Broodstock,
    /// Table-size lobster
    #[serde(rename = "konsumsi")]
    #[strum(serialize = "konsumsi")]
    Consumption,
}

/// Unit that `stock` and `price` are counted in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
    Default,
    ToSchema,
)]
pub enum StockUnit {
    /// Per head
    #[default]
    #[serde(rename = "ekor")]
    #[strum(serialize = "ekor")]
    Count,
    /// Per kilogram
    #[serde(rename = "kg")]
    #[strum(serialize = "kg")]
    WeightKg,
}

/// Lobster product (collection `lobsterproduct`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LobsterProduct {
    /// Product name, e.g. "Benih Lobster 2-3 cm"
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Size or grade, e.g. "2-3 cm" or "100-150 gr"
    pub size: Option<String>,
    /// Price in Rupiah
    #[schema(minimum = 0)]
    pub price: f64,
    #[schema(minimum = 0)]
    pub stock: i64,
    pub unit: StockUnit,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Schema for LobsterProduct {
    fn from_object(raw: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(raw);

        let name = r.required_text("name");
        let product_type = r.required_enum("type", ProductType::VARIANTS);
        let size = r.optional_text("size");
        let price = r.required_number("price");
        let price = r.ensure_min("price", price, 0.0);
        let stock = r.integer_or("stock", 0);
        let stock = r.ensure_min("stock", stock, 0);
        let unit = r.enum_or("unit", StockUnit::default(), StockUnit::VARIANTS);
        let description = r.optional_text("description");
        let image_url = r.optional_url("image_url");

        r.finish(|| {
            Some(Self {
                name: name?,
                product_type: product_type?,
                size,
                price: price?,
                stock: stock?,
                unit: unit?,
                description,
                image_url,
            })
        })
    }
}

/// Customer lead (collection `inquiry`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Inquiry {
    pub name: String,
    /// WhatsApp or phone number, format not checked
    pub phone: String,
    pub email: Option<String>,
    pub message: String,
    /// Where the lead came from; "website" when omitted
    #[schema(default = "website")]
    pub source: Option<String>,
}

impl Schema for Inquiry {
    fn from_object(raw: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(raw);

        let name = r.required_text("name");
        let phone = r.required_text("phone");
        let email = r.optional_text("email");
        let message = r.required_text("message");
        let source = r.optional_text_or("source", DEFAULT_INQUIRY_SOURCE);

        r.finish(|| {
            Some(Self {
                name: name?,
                phone: phone?,
                email,
                message: message?,
                source,
            })
        })
    }
}

/// Body of `POST /api/seed`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeedRequest {
    /// Insert samples even when products already exist
    #[serde(default)]
    pub force: bool,
}

impl Schema for SeedRequest {
    fn from_object(raw: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(raw);
        let force = r.bool_or("force", false);
        r.finish(|| Some(Self { force: force? }))
    }
}

/// Result of a seed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeedOutcome {
    pub seeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of samples attempted, not necessarily stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl SeedOutcome {
    pub fn already_seeded() -> Self {
        Self {
            seeded: false,
            message: Some("Products already exist".to_string()),
            count: None,
        }
    }

    pub fn seeded(count: usize) -> Self {
        Self {
            seeded: true,
            message: None,
            count: Some(count),
        }
    }
}

/// Response of `POST /api/inquiries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InquiryCreated {
    /// Always "ok"
    pub status: String,
    /// Store-assigned identifier
    pub id: String,
}

impl InquiryCreated {
    pub fn new(id: String) -> Self {
        Self {
            status: "ok".to_string(),
            id,
        }
    }
}

/// Query string of `GET /api/products`
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Maximum number of products, must be positive
    #[param(default = 50, minimum = 1)]
    pub limit: Option<i64>,
}

/// Encode an entity as a BSON document for insertion
pub fn to_document<T: Serialize>(entity: &T) -> CatalogResult<Document> {
    bson::to_document(entity).map_err(|e| CatalogError::Serialization(e.to_string()))
}

/// Re-validate a stored document through the entity's schema
///
/// Extra fields such as `_id` and the timestamps are ignored.
pub fn from_document<T: Schema>(document: Document) -> Result<T, ValidationErrors> {
    let raw = Bson::Document(document).into_relaxed_extjson();
    T::from_value(&raw)
}
