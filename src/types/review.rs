use std::fmt;

/// Identity shared by review rows and catalog items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductKey {
    pub brand: String,
    pub model: String,
}

impl ProductKey {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.model)
    }
}

/// One retailer's rating summary for a product. `rating` is always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub brand: String,
    pub model: String,
    pub retailer: String,
    pub rating: f64,
    pub count: u64,
}

impl ReviewRow {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        retailer: impl Into<String>,
        rating: f64,
        count: u64,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            retailer: retailer.into(),
            rating,
            count,
        }
    }

    pub fn key(&self) -> ProductKey {
        ProductKey::new(self.brand.as_str(), self.model.as_str())
    }
}
