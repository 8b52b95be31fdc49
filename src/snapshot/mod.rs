pub mod model;
pub mod store;

pub use model::{MergedPrInfo, MetricsSnapshot, assemble};
pub use store::SnapshotStore;
