mod new_subscriber;
mod subscriber;
mod subscriber_email;
mod subscriber_status;

pub use new_subscriber::{DEFAULT_SOURCE, NewSubscriber};
pub use subscriber::Subscriber;
pub use subscriber_email::{SubscriberEmail, is_valid_email};
pub use subscriber_status::SubscriberStatus;
