use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown when a product has no category
pub const MISSING_CATEGORY: &str = "N/A";

/// Product identifier as returned by the catalog API
///
/// The API uses integers, but string identifiers are accepted so that local
/// catalogs exported from other systems load without conversion.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(id) => write!(f, "{}", id),
            ProductId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Product category from API
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Category {
    #[serde(default)]
    pub name: String,
}

/// Product record from API
///
/// Fields the listing never displays (slug, description, timestamps) are
/// ignored on deserialization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Category name, or [`MISSING_CATEGORY`] when absent or blank
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(MISSING_CATEGORY)
    }

    /// First image URL, or an empty string
    pub fn thumbnail(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or("")
    }
}

/// Display row for a single product with every default already applied
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProductRow {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub image: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        ProductRow {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            category: product.category_name().to_string(),
            image: product.thumbnail().to_string(),
        }
    }
}

/// Parse a JSON array of products
pub fn parse_products(json: &str) -> Result<Vec<Product>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_products_api_shape() {
        let json = r#"[
            {
                "id": 4,
                "title": "Handmade Fresh Table",
                "slug": "handmade-fresh-table",
                "price": 687,
                "description": "Andy shoes are designed to keeping in...",
                "category": {"id": 5, "name": "Others", "image": "https://placehold.co/600x400"},
                "images": ["https://placehold.co/600x400", "https://placehold.co/600x401"],
                "creationAt": "2024-01-01T00:00:00.000Z"
            }
        ]"#;

        let products = parse_products(json).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::Int(4));
        assert_eq!(products[0].title, "Handmade Fresh Table");
        assert_eq!(products[0].price, 687.0);
        assert_eq!(products[0].category_name(), "Others");
        assert_eq!(products[0].thumbnail(), "https://placehold.co/600x400");
    }

    #[test]
    fn test_parse_products_missing_optionals() {
        let json = r#"[{"id": "sku-1", "title": "Plain", "price": 9.5}]"#;

        let products = parse_products(json).unwrap();

        assert_eq!(products[0].id, ProductId::Text("sku-1".to_string()));
        assert_eq!(products[0].category, None);
        assert!(products[0].images.is_empty());
        assert_eq!(products[0].category_name(), MISSING_CATEGORY);
        assert_eq!(products[0].thumbnail(), "");
    }

    #[test]
    fn test_parse_products_null_optionals() {
        let json = r#"[{"id": 1, "title": "Plain", "price": 1, "category": null, "images": null}]"#;

        let products = parse_products(json).unwrap();

        assert_eq!(products[0].category_name(), "N/A");
        assert_eq!(products[0].thumbnail(), "");
    }

    #[test]
    fn test_parse_products_requires_title_and_price() {
        assert!(parse_products(r#"[{"id": 1, "price": 1}]"#).is_err());
        assert!(parse_products(r#"[{"id": 1, "title": "No price"}]"#).is_err());
    }

    #[test]
    fn test_blank_category_name_uses_placeholder() {
        let product = Product {
            id: ProductId::Int(1),
            title: "Chair".to_string(),
            price: 10.0,
            category: Some(Category {
                name: String::new(),
            }),
            images: vec![],
        };

        assert_eq!(product.category_name(), "N/A");
    }

    #[test]
    fn test_product_row_from_product() {
        let product = Product {
            id: ProductId::Int(7),
            title: "Lamp".to_string(),
            price: 25.0,
            category: Some(Category {
                name: "Furniture".to_string(),
            }),
            images: vec!["https://example.com/lamp.png".to_string()],
        };

        let row = ProductRow::from(&product);

        assert_eq!(row.id.to_string(), "7");
        assert_eq!(row.title, "Lamp");
        assert_eq!(row.category, "Furniture");
        assert_eq!(row.image, "https://example.com/lamp.png");
    }
}
