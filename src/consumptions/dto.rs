use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;

/// Body for logging or replacing a consumption entry: so many grams of
/// one product eaten as part of one meal.
#[derive(Debug, Deserialize)]
pub struct ConsumptionInput {
    pub meal_id: Uuid,
    pub product_id: Uuid,
    pub quantity_g: f64,
}

impl ConsumptionInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.quantity_g.is_finite() || self.quantity_g <= 0.0 {
            return Err(AppError::validation("quantity_g must be a positive number"));
        }
        Ok(())
    }
}
