// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of "now", injected so token expiry checks can be tested.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
