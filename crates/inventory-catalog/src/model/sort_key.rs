//! The sort key accepted by the top-products query.

use serde::Serialize;
use std::fmt::Display;

/// Which field the top-products query orders by, ascending.
///
/// Parsing never fails: `price` and `quantity` are recognised case-insensitively and anything
/// else, including no key at all, orders by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Quantity,
    #[default]
    Name,
}

impl SortKey {
    pub fn parse(key: Option<&str>) -> Self {
        match key {
            Some(key) if key.eq_ignore_ascii_case("price") => SortKey::Price,
            Some(key) if key.eq_ignore_ascii_case("quantity") => SortKey::Quantity,
            _ => SortKey::Name,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Quantity => "quantity",
            SortKey::Name => "name",
        }
    }
}

impl From<Option<&str>> for SortKey {
    fn from(key: Option<&str>) -> Self {
        Self::parse(key)
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
