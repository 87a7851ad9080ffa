//! Formatter port turning domain events into notification text.

use crate::domain::DomainEvent;

/// Pure mapping from a domain event to message text.
pub trait EventFormatter: Send + Sync {
    fn render(&self, event: &DomainEvent) -> String;
}
