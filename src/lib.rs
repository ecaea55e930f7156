pub mod error;
pub mod parse;
pub mod planner;
pub mod presets;
pub mod render;
pub mod summary;
pub mod types;

pub use error::PlanError;
pub use planner::plan;
pub use summary::summarize;
pub use types::{Plan, StockUsage, Summary};
