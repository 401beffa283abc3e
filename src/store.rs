use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use crate::domain::{
    DEFAULT_SOURCE, NewSubscriber, Subscriber, SubscriberEmail, SubscriberStatus,
};

/// What a subscribe call did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Created,
    Reactivated,
    AlreadySubscribed,
}

/// What an unsubscribe call did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    Unsubscribed,
    NotSubscribed,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("The subscriber store lock is poisoned.")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

#[derive(Default)]
struct Registry {
    // Insertion order; records are never removed.
    records: Vec<Subscriber>,
    // Email -> index into `records`.
    positions: HashMap<String, usize>,
}

/// In-memory registry of subscribers shared by every request handler.
///
/// Every check-and-mutate step runs under the write lock, so two concurrent
/// subscriptions for the same address can never both create a record.
/// Nothing is persisted: dropping the store drops every subscriber.
#[derive(Default)]
pub struct SubscriberStore {
    registry: RwLock<Registry>,
}

impl SubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the subscriber, reactivate it, or leave an active one alone.
    #[tracing::instrument(
        name = "Saving subscriber in the store",
        skip(self, new_subscriber),
        fields(subscriber_email = %new_subscriber.email)
    )]
    pub fn subscribe(&self, new_subscriber: NewSubscriber) -> Result<SubscribeOutcome, StoreError> {
        let NewSubscriber {
            email,
            source,
            timestamp,
        } = new_subscriber;
        let timestamp = timestamp.unwrap_or_else(Utc::now);

        let mut registry = self.registry.write()?;
        if let Some(&position) = registry.positions.get(email.as_ref()) {
            let record = &mut registry.records[position];
            if record.status.is_active() {
                return Ok(SubscribeOutcome::AlreadySubscribed);
            }
            record.status = SubscriberStatus::Active;
            record.timestamp = timestamp;
            return Ok(SubscribeOutcome::Reactivated);
        }

        let email = email.into_inner();
        let position = registry.records.len();
        registry.records.push(Subscriber {
            email: email.clone(),
            timestamp,
            source: source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            status: SubscriberStatus::Active,
        });
        registry.positions.insert(email, position);
        Ok(SubscribeOutcome::Created)
    }

    /// Mark an active subscriber as unsubscribed. The record is kept.
    #[tracing::instrument(
        name = "Unsubscribing subscriber in the store",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    pub fn unsubscribe(&self, email: &SubscriberEmail) -> Result<UnsubscribeOutcome, StoreError> {
        let mut registry = self.registry.write()?;
        let Some(&position) = registry.positions.get(email.as_ref()) else {
            return Ok(UnsubscribeOutcome::NotSubscribed);
        };
        let record = &mut registry.records[position];
        if record.status.is_unsubscribed() {
            return Ok(UnsubscribeOutcome::NotSubscribed);
        }
        record.status = SubscriberStatus::Unsubscribed;
        Ok(UnsubscribeOutcome::Unsubscribed)
    }

    /// Snapshot of every subscriber, in the order they first subscribed.
    pub fn list(&self) -> Result<Vec<Subscriber>, StoreError> {
        Ok(self.registry.read()?.records.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.registry.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Panic while holding the write lock, leaving the lock poisoned.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.registry.write().unwrap();
            panic!("Panicking while holding the subscriber store lock.");
        }));
    }
}
