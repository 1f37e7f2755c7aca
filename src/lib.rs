// Library entry so integration tests and external tools can reference internal modules.
// The binary (`main.rs`) only wires these together.
pub mod api;
pub mod commands;
pub mod config;
pub mod constants;
pub mod handler;
pub mod model;
pub mod services;
pub mod util;

pub use config::Config;
pub use model::AppState;
