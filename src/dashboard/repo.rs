use sqlx::prelude::FromRow;
use sqlx::SqlitePool;
use time::Date;
use uuid::Uuid;

use super::dto::DayTotals;

/// One day's sums straight out of the grouped range query.
#[derive(Debug, FromRow)]
pub struct DayRow {
    pub date: Date,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl DayRow {
    pub fn into_totals(self) -> (Date, DayTotals) {
        (
            self.date,
            DayTotals {
                calories: self.calories,
                protein: self.protein,
                carbs: self.carbs,
                fat: self.fat,
            },
        )
    }
}

/// Macro totals for one user on one day. Empty days sum to zero rather
/// than erroring.
pub async fn totals_for_day(
    db: &SqlitePool,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<DayTotals> {
    let totals = sqlx::query_as::<_, DayTotals>(
        r#"
        SELECT
            COALESCE(SUM(p.calories_per_100g * c.quantity_g / 100.0), 0.0) AS calories,
            COALESCE(SUM(p.protein_g_per_100g * c.quantity_g / 100.0), 0.0) AS protein,
            COALESCE(SUM(p.carbs_g_per_100g * c.quantity_g / 100.0), 0.0) AS carbs,
            COALESCE(SUM(p.fat_g_per_100g * c.quantity_g / 100.0), 0.0) AS fat
        FROM consumptions c
        JOIN meals m ON m.id = c.meal_id
        JOIN products p ON p.id = c.product_id
        WHERE c.user_id = ? AND m.date = ?
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(db)
    .await?;
    Ok(totals)
}

/// Per-day totals for every day in `[from, to]` that has at least one
/// entry. Days without data are absent; the caller zero-fills them.
pub async fn totals_by_day(
    db: &SqlitePool,
    user_id: Uuid,
    from: Date,
    to: Date,
) -> anyhow::Result<Vec<DayRow>> {
    let rows = sqlx::query_as::<_, DayRow>(
        r#"
        SELECT m.date AS date,
            COALESCE(SUM(p.calories_per_100g * c.quantity_g / 100.0), 0.0) AS calories,
            COALESCE(SUM(p.protein_g_per_100g * c.quantity_g / 100.0), 0.0) AS protein,
            COALESCE(SUM(p.carbs_g_per_100g * c.quantity_g / 100.0), 0.0) AS carbs,
            COALESCE(SUM(p.fat_g_per_100g * c.quantity_g / 100.0), 0.0) AS fat
        FROM consumptions c
        JOIN meals m ON m.id = c.meal_id
        JOIN products p ON p.id = c.product_id
        WHERE c.user_id = ? AND m.date BETWEEN ? AND ?
        GROUP BY m.date
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
