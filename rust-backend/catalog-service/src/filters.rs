use serde::Deserialize;

use crate::models::Product;

/// Selector value meaning "no constraint".
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Missing, empty and `"all"` all mean no constraint.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(ALL) => Selection::All,
            Some(value) => Selection::Only(value.to_string()),
        }
    }

    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Selection,
    pub brand: Selection,
}

impl CatalogFilter {
    pub fn from_query(query: &FilterQuery) -> Self {
        Self {
            category: Selection::parse(query.category.as_deref()),
            brand: Selection::parse(query.brand.as_deref()),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category == Selection::All && self.brand == Selection::All
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.category.admits(product.category.as_deref()) && self.brand.admits(product.brand.as_deref())
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        if self.is_unfiltered() {
            return products;
        }
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn product(name: &str, brand: Option<&str>, category: Option<&str>) -> Product {
        Product {
            id: RecordId::new(),
            name: name.to_string(),
            slug: None,
            description: None,
            images: Vec::new(),
            price: 1.0,
            mrp: None,
            brand: brand.map(str::to_string),
            category: category.map(str::to_string),
            weight: None,
            flavor: None,
            stock: None,
            is_active: true,
            extra: Default::default(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Whey", Some("ON"), Some("Protein")),
            product("Casein", Some("MB"), Some("Protein")),
            product("Multi", Some("ON"), Some("Vitamins")),
            product("Loose", None, None),
        ]
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse(None), Selection::All);
        assert_eq!(Selection::parse(Some("all")), Selection::All);
        assert_eq!(Selection::parse(Some("")), Selection::All);
        assert_eq!(Selection::parse(Some("All")), Selection::Only("All".to_string()));
    }

    #[test]
    fn test_all_sentinel_keeps_everything() {
        let filter = CatalogFilter::default();
        assert!(filter.is_unfiltered());
        assert_eq!(filter.apply(catalog()).len(), 4);
    }

    #[test]
    fn test_filter_by_category() {
        let filter = CatalogFilter::from_query(&FilterQuery {
            category: Some("Protein".to_string()),
            brand: Some(ALL.to_string()),
        });
        assert_eq!(names(&filter.apply(catalog())), vec!["Whey", "Casein"]);
    }

    #[test]
    fn test_filter_by_category_and_brand() {
        let filter = CatalogFilter::from_query(&FilterQuery {
            category: Some("Protein".to_string()),
            brand: Some("ON".to_string()),
        });
        assert_eq!(names(&filter.apply(catalog())), vec!["Whey"]);
    }

    #[test]
    fn test_unset_field_fails_a_specific_selection() {
        let filter = CatalogFilter {
            category: Selection::All,
            brand: Selection::Only("ON".to_string()),
        };
        assert!(!filter.matches(&product("Loose", None, None)));
    }
}
