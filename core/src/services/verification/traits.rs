//! Traits for the code store and mail delivery collaborators

use async_trait::async_trait;

/// Key-value store with expiry, holding outstanding verification codes
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store a value under `key`, overwriting any prior value, expiring
    /// after `ttl_seconds`
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Read the value under `key`; `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
}

/// Outbound mail channel used to deliver verification codes
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send an HTML mail; returns a provider message id on success
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<String, String>;
}
