//! Ordered ranges and the domain bounds of each ranged field

use serde::{Deserialize, Serialize};

use super::error::FilterError;

/// Inclusive domain of a ranged field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub field: &'static str,
    pub min: i64,
    pub max: i64,
}

/// Age in years
pub const AGE_BOUNDS: Bounds = Bounds { field: "age", min: 18, max: 85 };
/// Annual income in thousands of dollars
pub const INCOME_BOUNDS: Bounds = Bounds { field: "income", min: 0, max: 500 };
/// Height in inches (4'0" to 7'6")
pub const HEIGHT_BOUNDS: Bounds = Bounds { field: "height", min: 48, max: 90 };
/// Waist circumference in inches
pub const WAIST_BOUNDS: Bounds = Bounds { field: "waist", min: 22, max: 90 };
/// Relative fat mass in percent
pub const RFM_BOUNDS: Bounds = Bounds { field: "rfm", min: 10, max: 65 };

/// An ordered pair `low <= high`
///
/// Serializes as a two-element array; deserialization re-checks the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct RangeSel {
    low: i64,
    high: i64,
}

impl RangeSel {
    pub fn new(low: i64, high: i64) -> Result<Self, FilterError> {
        if low > high {
            return Err(FilterError::InvertedRange { field: "range", low, high });
        }
        Ok(Self { low, high })
    }

    /// Construct and check against a field's domain
    pub fn within(low: i64, high: i64, bounds: Bounds) -> Result<Self, FilterError> {
        if low > high {
            return Err(FilterError::InvertedRange { field: bounds.field, low, high });
        }
        if low < bounds.min || high > bounds.max {
            return Err(FilterError::OutOfBounds {
                field: bounds.field,
                low,
                high,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(Self { low, high })
    }

    /// Check an existing range against a field's domain
    pub fn check(&self, bounds: Bounds) -> Result<(), FilterError> {
        Self::within(self.low, self.high, bounds).map(|_| ())
    }

    /// The full domain as a range
    pub const fn full(bounds: Bounds) -> Self {
        Self { low: bounds.min, high: bounds.max }
    }

    pub(crate) const fn unchecked(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    /// `high - low`
    pub fn span(&self) -> i64 {
        self.high - self.low
    }

    /// True when the range covers the whole domain (or more)
    pub fn spans(&self, bounds: Bounds) -> bool {
        self.low <= bounds.min && self.high >= bounds.max
    }

    /// True when at least one end is pulled inside the domain
    pub fn is_strict_subset_of(&self, bounds: Bounds) -> bool {
        self.low > bounds.min || self.high < bounds.max
    }
}

impl TryFrom<Vec<i64>> for RangeSel {
    type Error = FilterError;

    fn try_from(value: Vec<i64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [low, high] => RangeSel::new(*low, *high),
            other => Err(FilterError::MalformedRange(format!("{:?}", other))),
        }
    }
}

impl From<RangeSel> for Vec<i64> {
    fn from(value: RangeSel) -> Self {
        vec![value.low, value.high]
    }
}
