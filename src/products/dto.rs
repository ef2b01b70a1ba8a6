use serde::Deserialize;

use crate::error::AppError;

/// Body for creating or replacing a product. Missing macro fields mean
/// "0 per 100g".
#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub calories_per_100g: f64,
    #[serde(default)]
    pub protein_g_per_100g: f64,
    #[serde(default)]
    pub carbs_g_per_100g: f64,
    #[serde(default)]
    pub fat_g_per_100g: f64,
}

impl ProductInput {
    /// Trims the name and checks the nutrition facts. Per-100g values must
    /// be finite and non-negative.
    pub fn validate(&mut self) -> Result<(), AppError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(AppError::validation("name is required"));
        }
        let fields = [
            ("calories_per_100g", self.calories_per_100g),
            ("protein_g_per_100g", self.protein_g_per_100g),
            ("carbs_g_per_100g", self.carbs_g_per_100g),
            ("fat_g_per_100g", self.fat_g_per_100g),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Validation(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}
