pub mod changes;
pub mod classify;
pub mod collect;
pub mod registry;
pub mod window;

pub use registry::{UserRegistry, UserStats};
pub use window::ReportWindow;
