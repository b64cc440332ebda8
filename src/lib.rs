pub mod artifacts;
pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod presentation;
pub mod session;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
