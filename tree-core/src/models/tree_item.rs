use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Rejection reasons for a tree measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeasurementError {
    #[error("circumference must be greater than zero, got {0}")]
    NonPositiveCircumference(Decimal),

    #[error("height must be greater than zero, got {0}")]
    NonPositiveHeight(Decimal),

    #[error("circumference cannot exceed {max} ft, got {0}", max = TreeItem::MAX_MEASUREMENT)]
    CircumferenceTooLarge(Decimal),

    #[error("height cannot exceed {max} ft, got {0}", max = TreeItem::MAX_MEASUREMENT)]
    HeightTooLarge(Decimal),
}

/// One measured tree. Measurements are in feet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    pub id: Uuid,
    pub circumference: Decimal,
    pub height: Decimal,
    #[serde(default)]
    pub notes: String,
}

impl TreeItem {
    /// Upper bound, in feet, for either measurement.
    pub const MAX_MEASUREMENT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

    /// Builds a tree with a fresh id.
    ///
    /// Both measurements must lie in `(0, MAX_MEASUREMENT]`; nothing is
    /// created otherwise.
    pub fn new(
        circumference: Decimal,
        height: Decimal,
        notes: impl Into<String>,
    ) -> Result<Self, MeasurementError> {
        check_measurements(circumference, height)?;

        Ok(Self {
            id: Uuid::new_v4(),
            circumference,
            height,
            notes: notes.into(),
        })
    }

    /// Re-checks the measurements of a tree that did not come through
    /// [`TreeItem::new`], e.g. one read back from storage.
    pub fn validate(&self) -> Result<(), MeasurementError> {
        check_measurements(self.circumference, self.height)
    }
}

fn check_measurements(
    circumference: Decimal,
    height: Decimal,
) -> Result<(), MeasurementError> {
    if circumference <= Decimal::ZERO {
        return Err(MeasurementError::NonPositiveCircumference(circumference));
    }
    if height <= Decimal::ZERO {
        return Err(MeasurementError::NonPositiveHeight(height));
    }
    if circumference > TreeItem::MAX_MEASUREMENT {
        return Err(MeasurementError::CircumferenceTooLarge(circumference));
    }
    if height > TreeItem::MAX_MEASUREMENT {
        return Err(MeasurementError::HeightTooLarge(height));
    }
    Ok(())
}
