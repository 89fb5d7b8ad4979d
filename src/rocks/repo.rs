use sqlx::{FromRow, PgPool};

/// Rock row as stored.
#[derive(Debug, Clone, FromRow)]
pub struct Rock {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub weight: f64,
    pub type_id: i64,
}

/// Rock joined with the user and type columns the expanded shape needs.
#[derive(Debug, Clone, FromRow)]
pub struct RockWithRelations {
    pub id: i64,
    pub name: String,
    pub weight: f64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub type_label: String,
}

impl Rock {
    /// Insert a new rock owned by `user_id`. The caller has already verified
    /// that `type_id` references an existing type.
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        name: &str,
        weight: f64,
        type_id: i64,
    ) -> Result<Rock, sqlx::Error> {
        sqlx::query_as::<_, Rock>(
            r#"
            INSERT INTO rocks (user_id, name, weight, type_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, weight, type_id
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(weight)
        .bind(type_id)
        .fetch_one(db)
        .await
    }

    /// Fetch all rocks with their related user and type in one query.
    pub async fn list_expanded(db: &PgPool) -> Result<Vec<RockWithRelations>, sqlx::Error> {
        sqlx::query_as::<_, RockWithRelations>(
            r#"
            SELECT r.id, r.name, r.weight,
                   u.id AS user_id, u.first_name, u.last_name,
                   t.label AS type_label
            FROM rocks r
            JOIN users u ON u.id = r.user_id
            JOIN types t ON t.id = r.type_id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<Rock>, sqlx::Error> {
        sqlx::query_as::<_, Rock>(
            r#"
            SELECT id, user_id, name, weight, type_id
            FROM rocks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM rocks WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
