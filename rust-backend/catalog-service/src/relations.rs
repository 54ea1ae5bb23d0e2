//! Derived links between catalog records.
//!
//! Products point at brands and categories by *name*. Matching is exact and
//! case-sensitive: a product whose `brand` reads "optimum" never shows up on
//! the "Optimum" brand page, and renaming a brand orphans every product that
//! still carries the old name.

use crate::db::{CatalogRepo, StoreError};
use crate::models::{Brand, Product};

pub const RELATED_LIMIT: usize = 4;

// unset on either side never matches
fn same_name(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// Active products whose `brand` equals the brand's name.
pub fn products_for_brand<'a, I>(brand: &Brand, products: I) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| p.is_active && p.brand.as_deref() == Some(brand.name.as_str()))
        .cloned()
        .collect()
}

/// Up to `limit` other products sharing a category or brand with `product`,
/// in candidate order.
pub fn related_products(product: &Product, candidates: &[Product], limit: usize) -> Vec<Product> {
    candidates
        .iter()
        .filter(|q| q.id != product.id)
        .filter(|q| {
            same_name(&q.category, &product.category) || same_name(&q.brand, &product.brand)
        })
        .take(limit)
        .cloned()
        .collect()
}

pub async fn resolve_brand_products(
    repo: &dyn CatalogRepo,
    brand: &Brand,
) -> Result<Vec<Product>, StoreError> {
    let products = repo.list_products(true).await?;
    Ok(products_for_brand(brand, &products))
}

/// Slug of the brand named by `product.brand`, if there is one.
///
/// A missing brand, an unknown name, or a brand without a slug all give
/// `None`; only a store failure is an error.
pub async fn resolve_brand_slug(
    repo: &dyn CatalogRepo,
    product: &Product,
) -> Result<Option<String>, StoreError> {
    let Some(name) = product.brand.as_deref() else {
        return Ok(None);
    };

    let brand = repo.find_brand_by_name(name).await?;
    Ok(brand.and_then(|b| b.slug).filter(|slug| !slug.is_empty()))
}
