use crate::product::Product;

/// Keep the products whose title contains `keyword`, ignoring case
///
/// An empty keyword matches every product. The result preserves the
/// relative order of `products`.
pub fn filter_products(products: &[Product], keyword: &str) -> Vec<Product> {
    let needle = keyword.to_lowercase();

    products
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
