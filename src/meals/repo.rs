use serde::Serialize;
use sqlx::prelude::FromRow;
use sqlx::SqlitePool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// A named container for consumption entries on one calendar day.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Meal {
    /// All meals owned by one user, newest day first. Meals on the same
    /// day keep their creation order.
    pub async fn list_by_user(db: &SqlitePool, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let meals = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, date, created_at
            FROM meals
            WHERE user_id = ?
            ORDER BY date DESC, rowid ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(meals)
    }

    /// The user's meals for one day, ordered by name for the dashboard.
    pub async fn list_for_day(
        db: &SqlitePool,
        user_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<Meal>> {
        let meals = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, date, created_at
            FROM meals
            WHERE user_id = ? AND date = ?
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(db)
        .await?;
        Ok(meals)
    }

    /// A single meal, only if it belongs to the user.
    pub async fn find_owned(
        db: &SqlitePool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, date, created_at
            FROM meals
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(meal)
    }

    pub async fn create(
        db: &SqlitePool,
        user_id: Uuid,
        name: &str,
        date: Date,
    ) -> anyhow::Result<Meal> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, user_id, name, date, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, name, date, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(name)
        .bind(date)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await?;
        Ok(meal)
    }

    /// Replaces name and date. Returns `None` when the meal does not
    /// exist or belongs to somebody else.
    pub async fn update(
        db: &SqlitePool,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        date: Date,
    ) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            UPDATE meals
            SET name = ?, date = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, name, date, created_at
            "#,
        )
        .bind(name)
        .bind(date)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(meal)
    }

    /// Deletes a meal and every consumption inside it, in one transaction.
    /// Returns `false` when the meal does not exist or belongs to somebody
    /// else; nothing is removed in that case.
    pub async fn delete(db: &SqlitePool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM consumptions WHERE meal_id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM meals WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
