//! Display-time ordering of products
//!
//! Sorting never touches the filtered sequence the session stores; it always
//! produces a new vector, so clearing the sort field restores filter order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::product::Product;

/// Column a listing can be ordered by
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Price,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Title => write!(f, "title"),
            SortField::Price => write!(f, "price"),
        }
    }
}

/// Error returned when a sort field name is not recognized
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown sort field: {0}. Valid fields: title, price")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "price" => Ok(SortField::Price),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Current ordering selected by the user
///
/// `direction` only matters while `field` is set.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    /// Apply a click on a sort column
    ///
    /// Selecting the active field flips the direction; selecting a different
    /// field makes it active in ascending order.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }
}

/// Return `products` ordered by `field` in `direction`
///
/// With no field the input order is returned unchanged. The sort is stable in
/// both directions, so products that compare equal keep their input order.
pub fn sort_products(
    products: &[Product],
    field: Option<SortField>,
    direction: SortDirection,
) -> Vec<Product> {
    let mut sorted = products.to_vec();

    let Some(field) = field else {
        return sorted;
    };

    sorted.sort_by(|a, b| {
        let ordering = match field {
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Title => compare_titles(&a.title, &b.title),
        };

        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    sorted
}

/// Compare two titles the way a locale-aware collator would for Latin text
///
/// Base letters decide first (accents and case ignored), then accents, then
/// case with lowercase ahead of uppercase.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| compare_case(a, b))
}

fn primary_key(s: &str) -> Vec<char> {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accent_key(s: &str) -> Vec<char> {
    s.nfkd().flat_map(char::to_lowercase).collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.nfkd().map(char::is_uppercase).collect()
}

fn compare_case(a: &str, b: &str) -> Ordering {
    case_key(a).cmp(&case_key(b)).then_with(|| a.cmp(b))
}
