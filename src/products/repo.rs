use serde::Serialize;
use sqlx::prelude::FromRow;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::ProductInput;

/// A food item with nutrition facts per 100 grams, owned by one user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_g_per_100g: f64,
    pub carbs_g_per_100g: f64,
    pub fat_g_per_100g: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Product {
    /// All products owned by one user, oldest first.
    pub async fn list_by_user(db: &SqlitePool, user_id: Uuid) -> anyhow::Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, calories_per_100g, protein_g_per_100g,
                   carbs_g_per_100g, fat_g_per_100g, created_at
            FROM products
            WHERE user_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(products)
    }

    /// A single product, only if it belongs to the user.
    pub async fn find_owned(
        db: &SqlitePool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, calories_per_100g, protein_g_per_100g,
                   carbs_g_per_100g, fat_g_per_100g, created_at
            FROM products
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    pub async fn create(
        db: &SqlitePool,
        user_id: Uuid,
        input: &ProductInput,
    ) -> anyhow::Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, user_id, name, calories_per_100g, protein_g_per_100g,
                                  carbs_g_per_100g, fat_g_per_100g, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, name, calories_per_100g, protein_g_per_100g,
                      carbs_g_per_100g, fat_g_per_100g, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&input.name)
        .bind(input.calories_per_100g)
        .bind(input.protein_g_per_100g)
        .bind(input.carbs_g_per_100g)
        .bind(input.fat_g_per_100g)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await?;
        Ok(product)
    }

    /// Replaces every editable field. Returns `None` when the product does
    /// not exist or belongs to somebody else.
    pub async fn update(
        db: &SqlitePool,
        user_id: Uuid,
        id: Uuid,
        input: &ProductInput,
    ) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = ?, calories_per_100g = ?, protein_g_per_100g = ?,
                carbs_g_per_100g = ?, fat_g_per_100g = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, name, calories_per_100g, protein_g_per_100g,
                      carbs_g_per_100g, fat_g_per_100g, created_at
            "#,
        )
        .bind(&input.name)
        .bind(input.calories_per_100g)
        .bind(input.protein_g_per_100g)
        .bind(input.carbs_g_per_100g)
        .bind(input.fat_g_per_100g)
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    /// Deletes a product and every consumption that references it, in one
    /// transaction. Returns `false` when the product does not exist or
    /// belongs to somebody else; nothing is removed in that case.
    pub async fn delete(db: &SqlitePool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM consumptions WHERE product_id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM products WHERE id = ? AND user_id = ?")
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
