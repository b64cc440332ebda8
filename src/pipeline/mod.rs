mod context;
mod predict;
mod projector;

pub use context::ModelContext;
pub use predict::{predict, run_prediction};
pub use projector::project;
