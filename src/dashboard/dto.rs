use serde::Serialize;
use sqlx::prelude::FromRow;
use time::Date;

use crate::consumptions::repo::ConsumptionView;
use crate::meals::repo::Meal;

/// Summed macro intake for one calendar day. All zero when nothing was
/// logged that day.
#[derive(Debug, Clone, Default, Serialize, FromRow)]
pub struct DayTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: Date,
    pub totals: DayTotals,
    pub meals: Vec<Meal>,
    pub consumptions: Vec<ConsumptionView>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub date: Date,
    pub totals: DayTotals,
}
