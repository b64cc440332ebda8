pub mod app;
pub mod drivers;
pub mod menu;

pub use app::InteractiveApp;
