mod user_repository;

use async_trait::async_trait;

pub use user_repository::UserRepository;

/// Single-entry-per-nickname store, overwritten on every `put`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, nick: &str) -> Result<Option<String>, anyhow::Error>;

    async fn put(&self, nick: &str, username: &str) -> Result<(), anyhow::Error>;
}
