//! Identifier generation for funds and contributions.

use uuid::Uuid;

pub trait IdProvider {
    fn next_id(&mut self) -> String;
}

/// Time-ordered random identifiers (UUIDv7).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdProvider for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Predictable identifiers such as `fund-1`, `fund-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
