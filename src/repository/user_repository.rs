use async_trait::async_trait;
use sqlx::{query, query_scalar, Pool, Sqlite};

use super::UserStore;

/// Maps chat nicknames to Steam vanity usernames.
pub struct UserRepository {
    pool: Pool<Sqlite>,
}

impl UserRepository {
    pub fn new(pool: Pool<Sqlite>) -> UserRepository {
        UserRepository { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get(&self, nick: &str) -> Result<Option<String>, anyhow::Error> {
        let username = query_scalar::<_, String>(
            r#"
                SELECT username FROM steam
                WHERE nick = $1
            "#,
        )
        .bind(nick)
        .fetch_optional(&self.pool)
        .await?;

        Ok(username)
    }

    async fn put(&self, nick: &str, username: &str) -> Result<(), anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        query(
            r#"
                INSERT INTO steam (nick, username)
                VALUES ($1, $2)
                ON CONFLICT (nick) DO UPDATE SET username = excluded.username
            "#,
        )
        .bind(nick)
        .bind(username)
        .execute(&mut *transaction)
        .await?;

        transaction.commit().await?;

        Ok(())
    }
}
