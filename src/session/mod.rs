mod controls;
mod cycle;
mod state;

pub use controls::ControlPanel;
pub use cycle::{Frame, Session, Trigger};
pub use state::{ResultStore, SessionResultState};
