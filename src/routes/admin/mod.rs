mod dashboard;
mod subscribers;

pub use dashboard::admin_dashboard;
pub use subscribers::*;
