use chrono::{DateTime, Utc};

use crate::domain::SubscriberStatus;

/// One email's subscription state as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Subscriber {
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub status: SubscriberStatus,
}
