use chrono::{DateTime, Utc};

use crate::domain::SubscriberEmail;

/// Origin tag recorded when the caller does not provide one.
pub const DEFAULT_SOURCE: &str = "website";

// A validated subscription request.
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub source: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewSubscriber {
    pub fn new(email: SubscriberEmail) -> Self {
        Self {
            email,
            source: None,
            timestamp: None,
        }
    }
}
