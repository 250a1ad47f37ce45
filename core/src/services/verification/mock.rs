//! Mock implementations of the code store and mail channel
//!
//! Kept outside `#[cfg(test)]` so integration tests can use them too.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{CodeStore, MailService};

/// In-memory code store with manually driven expiry
pub struct MockCodeStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    should_fail: bool,
}

impl MockCodeStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    /// Simulate TTL elapse by dropping the entry
    pub fn expire(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    /// Read the currently stored value, bypassing the trait
    pub fn stored(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl CodeStore for MockCodeStore {
    async fn set(&self, key: &str, value: &str, _ttl_seconds: u64) -> Result<(), String> {
        if self.should_fail {
            return Err("code store error".to_string());
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        if self.should_fail {
            return Err("code store error".to_string());
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }
}

/// A mail captured by the mock channel
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Mail channel that records instead of delivering
pub struct MockMailService {
    pub sent: Arc<Mutex<Vec<SentMail>>>,
    pub should_fail: bool,
}

impl MockMailService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    /// The most recent mail sent to the given address
    pub fn last_mail_to(&self, address: &str) -> Option<SentMail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.to == address)
            .cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("mail channel error".to_string());
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(format!("mock-mail-{}", uuid::Uuid::new_v4()))
    }
}
