pub mod bitbucket;
pub mod error;
pub mod metrics;
pub mod snapshot;
pub mod util;
