use sqlx::{FromRow, PgPool};

/// Identity record owned by the auth subsystem. Read-only here.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Fetch a user by primary key. The acting user is expected to exist, so
    /// a missing row surfaces as a database error.
    pub async fn get(db: &PgPool, id: i64) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(db)
        .await
    }
}
