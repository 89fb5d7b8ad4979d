use sqlx::{FromRow, PgPool};

/// Classification record referenced by rocks. Populated externally.
#[derive(Debug, Clone, FromRow)]
pub struct RockType {
    pub id: i64,
    pub label: String,
}

impl RockType {
    /// Look up a type by primary key.
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<RockType>, sqlx::Error> {
        sqlx::query_as::<_, RockType>(
            r#"
            SELECT id, label
            FROM types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}
