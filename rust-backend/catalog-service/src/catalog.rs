use std::sync::Arc;

use tracing::warn;

use crate::db::CatalogRepo;
use crate::errors::CatalogError;
use crate::filters::CatalogFilter;
use crate::models::{Brand, BrandPage, Category, ListingPage, Product, ProductCard, ProductDetail};
use crate::relations::{related_products, resolve_brand_products, resolve_brand_slug, RELATED_LIMIT};

/// Read operations behind the catalog routes.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepo>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepo>) -> Self {
        Self { repo }
    }

    pub async fn list_products(&self, filter: &CatalogFilter) -> Result<Vec<Product>, CatalogError> {
        let products = self.repo.list_products(true).await?;
        Ok(filter.apply(products))
    }

    async fn active_product(&self, slug: &str) -> Result<Product, CatalogError> {
        self.repo
            .get_product_by_slug(slug)
            .await?
            .ok_or(CatalogError::NotFound("Product"))
    }

    pub async fn product_detail(&self, slug: &str) -> Result<ProductDetail, CatalogError> {
        let product = self.active_product(slug).await?;
        let brand_slug = resolve_brand_slug(self.repo.as_ref(), &product).await?;
        Ok(ProductDetail { product, brand_slug })
    }

    /// Related products for the product at `slug`. Failing to load the
    /// candidates yields an empty list rather than an error.
    pub async fn related_products(&self, slug: &str) -> Result<Vec<Product>, CatalogError> {
        let product = self.active_product(slug).await?;
        let candidates = match self.repo.list_products(true).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("related products unavailable for {}: {}", slug, e);
                Vec::new()
            }
        };
        Ok(related_products(&product, &candidates, RELATED_LIMIT))
    }

    pub async fn list_brands(&self) -> Result<Vec<Brand>, CatalogError> {
        Ok(self.repo.list_brands().await?)
    }

    pub async fn brand_page(&self, slug: &str) -> Result<BrandPage, CatalogError> {
        let brand = self
            .repo
            .get_brand_by_slug(slug)
            .await?
            .ok_or(CatalogError::NotFound("Brand"))?;
        let products = resolve_brand_products(self.repo.as_ref(), &brand).await?;
        Ok(BrandPage { brand, products })
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.repo.list_categories().await?)
    }

    /// Products, categories and brands for the listing page, fetched
    /// together; any one failing fails the whole page.
    pub async fn listing(&self, filter: &CatalogFilter) -> Result<ListingPage, CatalogError> {
        let (products, categories, brands) = tokio::try_join!(
            self.repo.list_products(true),
            self.repo.list_categories(),
            self.repo.list_brands(),
        )?;

        Ok(ListingPage {
            products: filter.apply(products).into_iter().map(ProductCard::from).collect(),
            categories,
            brands,
        })
    }
}
