//! Table bootstrap for the relational backend
//!
//! Creates `lists` and `todos` when they are missing. Existing tables
//! are left untouched.

use sqlx::PgPool;

/// Create the tables used by [`crate::store::PgStore`] if needed.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring todo list schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lists (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
                CHECK (char_length(name) BETWEEN 1 AND 100)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL
                CHECK (char_length(name) BETWEEN 1 AND 100),
            completed BOOLEAN NOT NULL DEFAULT false,
            list_id INTEGER NOT NULL REFERENCES lists (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_list_id ON todos (list_id)")
        .execute(pool)
        .await?;

    tracing::info!("Todo list schema ready");
    Ok(())
}
