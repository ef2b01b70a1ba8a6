use serde::Serialize;
use sqlx::prelude::FromRow;
use sqlx::SqlitePool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::ConsumptionInput;

/// A consumption entry joined with its meal and product, carrying the
/// macro contribution of this entry (per-100g facts scaled by grams).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConsumptionView {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub meal_name: String,
    pub date: Date,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity_g: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

pub struct Consumption;

impl Consumption {
    /// All of one user's entries, oldest first.
    pub async fn list_views(
        db: &SqlitePool,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<ConsumptionView>> {
        let views = sqlx::query_as::<_, ConsumptionView>(
            r#"
            SELECT c.id, c.meal_id, m.name AS meal_name, m.date AS date,
                   c.product_id, p.name AS product_name, c.quantity_g,
                   p.calories_per_100g * c.quantity_g / 100.0 AS calories,
                   p.protein_g_per_100g * c.quantity_g / 100.0 AS protein,
                   p.carbs_g_per_100g * c.quantity_g / 100.0 AS carbs,
                   p.fat_g_per_100g * c.quantity_g / 100.0 AS fat
            FROM consumptions c
            JOIN meals m ON m.id = c.meal_id
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = ?
            ORDER BY c.rowid
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(views)
    }

    /// One user's entries whose meal falls on the given day, oldest first.
    pub async fn list_views_for_day(
        db: &SqlitePool,
        user_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<ConsumptionView>> {
        let views = sqlx::query_as::<_, ConsumptionView>(
            r#"
            SELECT c.id, c.meal_id, m.name AS meal_name, m.date AS date,
                   c.product_id, p.name AS product_name, c.quantity_g,
                   p.calories_per_100g * c.quantity_g / 100.0 AS calories,
                   p.protein_g_per_100g * c.quantity_g / 100.0 AS protein,
                   p.carbs_g_per_100g * c.quantity_g / 100.0 AS carbs,
                   p.fat_g_per_100g * c.quantity_g / 100.0 AS fat
            FROM consumptions c
            JOIN meals m ON m.id = c.meal_id
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = ? AND m.date = ?
            ORDER BY c.rowid
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(db)
        .await?;
        Ok(views)
    }

    /// Inserts an entry and reads back the joined view. The caller has
    /// already verified that meal and product belong to the user.
    pub async fn create(
        db: &SqlitePool,
        user_id: Uuid,
        input: &ConsumptionInput,
    ) -> anyhow::Result<ConsumptionView> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO consumptions (id, user_id, meal_id, product_id, quantity_g, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(input.meal_id)
        .bind(input.product_id)
        .bind(input.quantity_g)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;

        let view = Self::view_by_id(db, user_id, id).await?;
        Ok(view)
    }

    /// Repoints an entry at a (possibly different) meal and product and
    /// updates the grams. Returns `None` when the entry does not exist or
    /// belongs to somebody else.
    pub async fn update(
        db: &SqlitePool,
        user_id: Uuid,
        id: Uuid,
        input: &ConsumptionInput,
    ) -> anyhow::Result<Option<ConsumptionView>> {
        let result = sqlx::query(
            r#"
            UPDATE consumptions
            SET meal_id = ?, product_id = ?, quantity_g = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(input.meal_id)
        .bind(input.product_id)
        .bind(input.quantity_g)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        let view = Self::view_by_id(db, user_id, id).await?;
        Ok(Some(view))
    }

    pub async fn delete(db: &SqlitePool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM consumptions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn view_by_id(
        db: &SqlitePool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<ConsumptionView> {
        let view = sqlx::query_as::<_, ConsumptionView>(
            r#"
            SELECT c.id, c.meal_id, m.name AS meal_name, m.date AS date,
                   c.product_id, p.name AS product_name, c.quantity_g,
                   p.calories_per_100g * c.quantity_g / 100.0 AS calories,
                   p.protein_g_per_100g * c.quantity_g / 100.0 AS protein,
                   p.carbs_g_per_100g * c.quantity_g / 100.0 AS carbs,
                   p.fat_g_per_100g * c.quantity_g / 100.0 AS fat
            FROM consumptions c
            JOIN meals m ON m.id = c.meal_id
            JOIN products p ON p.id = c.product_id
            WHERE c.id = ? AND c.user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(view)
    }
}
