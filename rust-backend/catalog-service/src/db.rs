use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Brand, Category, Product};

pub const PRODUCTS: &str = "products";
pub const BRANDS: &str = "brands";
pub const CATEGORIES: &str = "categories";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// Read-only access to the three catalog collections.
///
/// Lookups return `Ok(None)` when nothing matches; `Err` is reserved for the
/// store itself failing.
#[async_trait]
pub trait CatalogRepo: Send + Sync {
    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, StoreError>;

    /// Exact slug match among active products only.
    async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError>;

    async fn list_brands(&self) -> Result<Vec<Brand>, StoreError>;

    async fn get_brand_by_slug(&self, slug: &str) -> Result<Option<Brand>, StoreError>;

    async fn find_brand_by_name(&self, name: &str) -> Result<Option<Brand>, StoreError>;

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
}

#[derive(Clone)]
pub struct MongoCatalogRepo {
    products: Collection<Product>,
    brands: Collection<Brand>,
    categories: Collection<Category>,
}

impl MongoCatalogRepo {
    /// Parses the URI and builds a client; the driver opens connections on
    /// first use and pools them for the life of the process.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(&client.database(database)))
    }

    pub fn new(db: &Database) -> Self {
        Self {
            products: db.collection(PRODUCTS),
            brands: db.collection(BRANDS),
            categories: db.collection(CATEGORIES),
        }
    }
}

async fn find_all<T>(collection: &Collection<T>, filter: Document) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let cursor = collection.find(filter).await?;
    Ok(cursor.try_collect().await?)
}

#[async_trait]
impl CatalogRepo for MongoCatalogRepo {
    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, StoreError> {
        let filter = if active_only {
            doc! { "isActive": true }
        } else {
            doc! {}
        };
        find_all(&self.products, filter).await
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let product = self
            .products
            .find_one(doc! { "slug": slug, "isActive": true })
            .await?;
        Ok(product)
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, StoreError> {
        find_all(&self.brands, doc! {}).await
    }

    async fn get_brand_by_slug(&self, slug: &str) -> Result<Option<Brand>, StoreError> {
        Ok(self.brands.find_one(doc! { "slug": slug }).await?)
    }

    async fn find_brand_by_name(&self, name: &str) -> Result<Option<Brand>, StoreError> {
        Ok(self.brands.find_one(doc! { "name": name }).await?)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        find_all(&self.categories, doc! {}).await
    }
}
