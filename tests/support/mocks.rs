// tests/support/mocks.rs
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use blog_core::application::error::{ApplicationError, ApplicationResult};
use blog_core::application::ports::{
    security::PasswordHasher, time::Clock, util::SuffixGenerator,
};

/// Reversible "hash" so tests do not pay for argon2 on every login.
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain${password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("plain${password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Always reports the same instant, 2024-05-17 12:00:00 UTC.
pub struct FixedClock;

impl FixedClock {
    pub fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Self::instant()
    }
}

/// Hands out pre-recorded suffixes, then falls back to a counter.
#[derive(Default)]
pub struct ScriptedSuffixes {
    script: Mutex<VecDeque<String>>,
    counter: Mutex<u32>,
}

impl ScriptedSuffixes {
    pub fn new(values: &[&str]) -> Self {
        Self {
            script: Mutex::new(values.iter().map(|v| (*v).to_string()).collect()),
            counter: Mutex::new(0),
        }
    }
}

impl SuffixGenerator for ScriptedSuffixes {
    fn suffix(&self, len: usize) -> String {
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        format!("{:0>width$}", *counter, width = len)
    }
}
