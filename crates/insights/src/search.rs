//! Search input validation and supersession of in-flight searches.
//!
//! Every search takes a ticket. Only the newest ticket is current, so a slow
//! response for an older search is discarded instead of overwriting the result
//! of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::AppError;

/// Trim the raw input and reject anything that is not a plausible Lichess username.
pub fn normalize_username(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Username cannot be empty".into()));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::BadRequest(format!("Invalid username '{trimmed}'")));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding every earlier ticket.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Hand back `value` only if `ticket` is still the newest search.
    pub fn accept<T>(&self, ticket: SearchTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(ticket = ticket.0, "Discarding superseded search result");
            None
        }
    }
}
