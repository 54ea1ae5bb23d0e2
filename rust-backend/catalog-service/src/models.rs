use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use crate::slug::derive_slug;

// shown when a product has no images
pub const PLACEHOLDER_IMAGE: &str = "/common/goldenlogo.png";

/// Store-assigned document identifier.
///
/// Read from the store in its native form and always written out as the
/// 24-character hex string, so every record leaving the service carries a
/// transport-safe `_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(ObjectId);

impl RecordId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for RecordId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ObjectId::deserialize(deserializer).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub price: f64,
    // pre-discount reference price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<f64>,
    // brand *name*, not an id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default)]
    pub is_active: bool,
    // stored fields without a typed home, passed through as-is
    #[serde(flatten)]
    pub extra: Document,
}

/// Counts are sometimes stored as doubles; fractions truncate and
/// negatives read as zero.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.map(|n| n as u32))
}

impl Product {
    /// Stored slug, or the one derived from the name when none is stored.
    pub fn public_slug(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => derive_slug(&self.name),
        }
    }

    /// Whole-percent saving against `mrp`, 0 when there is no discount.
    pub fn discount_percent(&self) -> u32 {
        match self.mrp {
            Some(mrp) if mrp > self.price => {
                (((mrp - self.price) / mrp) * 100.0).round() as u32
            }
            _ => 0,
        }
    }

    pub fn main_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    // country of origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coo: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
}

/// Product detail payload: the product's own fields plus `brandSlug`.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "brandSlug")]
    pub brand_slug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BrandPage {
    pub brand: Brand,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub href: String,
    pub main_image: String,
    pub discount_percent: u32,
}

impl From<Product> for ProductCard {
    fn from(product: Product) -> Self {
        let href = format!("/products/{}", product.public_slug());
        let main_image = product.main_image().to_string();
        let discount_percent = product.discount_percent();
        Self {
            product,
            href,
            main_image,
            discount_percent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingPage {
    pub products: Vec<ProductCard>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEvent {
    pub id: Uuid,
    pub event_type: String, // "product.viewed" | "brand.viewed" | "contact.submitted"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CatalogEvent {
    pub fn new(event_type: &str, slug: Option<String>, name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.to_string(),
            slug,
            name,
            timestamp: Utc::now(),
        }
    }
}
