use serde::{Deserialize, Serialize};

/// Condition grades used across the catalog, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Mint,
    Excellent,
    Good,
    Fair,
}

impl Condition {
    /// Display label for piece pages and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Mint => "Mint",
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Accessories,
    Knitwear,
    Outerwear,
    Footwear,
    Timepieces,
    Jewelry,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Accessories => "Accessories",
            Category::Knitwear => "Knitwear",
            Category::Outerwear => "Outerwear",
            Category::Footwear => "Footwear",
            Category::Timepieces => "Timepieces",
            Category::Jewelry => "Jewelry",
        }
    }
}

/// A catalog piece. Prices are whole units of `currency` (the catalog is
/// curated one-off resale, nothing is priced in cents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub currency: String,
    pub condition: Condition,
    pub brand: String,
    pub category: Category,
    pub images: Vec<String>,
    pub featured: bool,
    pub stock: u32,
    pub seller_id: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

impl Product {
    /// Format the price for display, e.g. `$1,250`.
    pub fn display_price(&self) -> String {
        let symbol = match self.currency.as_str() {
            "USD" => "$",
            "EUR" => "\u{20ac}",
            "GBP" => "\u{a3}",
            _ => "",
        };
        format!("{}{}", symbol, group_thousands(self.price))
    }
}

/// Insert thousands separators into a whole number.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
