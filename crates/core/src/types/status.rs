//! Closed enumerations: order status and product category.
//!
//! Both serialize with their display names (`"Delivered"`, `"Pre-Workout"`)
//! so persisted records read the same as the labels shown to shoppers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders are created as [`OrderStatus::Delivered`]; the other states exist
/// in the record format but nothing transitions into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    Pending,
    #[default]
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Protein,
    #[serde(rename = "Pre-Workout")]
    PreWorkout,
    Vitamins,
    Equipment,
    Accessories,
    Clothing,
}

impl Category {
    /// Every category, in storefront menu order.
    pub const ALL: [Self; 6] = [
        Self::Protein,
        Self::PreWorkout,
        Self::Vitamins,
        Self::Equipment,
        Self::Accessories,
        Self::Clothing,
    ];

    /// Display name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Protein => "Protein",
            Self::PreWorkout => "Pre-Workout",
            Self::Vitamins => "Vitamins",
            Self::Equipment => "Equipment",
            Self::Accessories => "Accessories",
            Self::Clothing => "Clothing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Parses a display name, ignoring ASCII case (`protein`, `pre-workout`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}
