use crate::error::LearnHubError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// A course price in whole rupees.
///
/// This is a wrapper around `rust_decimal::Decimal` so prices never go through
/// floating point, and so a price can only be constructed positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, LearnHubError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LearnHubError::InvalidPrice(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Scales the price and rounds to whole rupees, half away from zero.
    fn scaled(&self, factor: Decimal) -> Decimal {
        (self.0 * factor).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = LearnHubError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Whole-rupee amounts are positive by construction.
impl From<NonZeroU32> for Price {
    fn from(rupees: NonZeroU32) -> Self {
        Self(Decimal::from(rupees.get()))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0.normalize())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

/// A catalog entry. Courses are never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub instructor: String,
    pub duration: String,
    pub level: Level,
    /// Search phrase for the cover image.
    pub image: String,
    pub rating: Decimal,
    pub students: u32,
}

/// Price breakdown shown next to the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub list_price: Decimal,
    pub discount: Decimal,
    pub total: Price,
}

impl Course {
    /// The struck-through "original" price, 1.5x the real one.
    pub fn list_price(&self) -> Decimal {
        self.price.scaled(dec!(1.5))
    }

    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary {
            list_price: self.list_price(),
            discount: self.price.scaled(dec!(0.5)),
            total: self.price,
        }
    }
}
