//! Command logic, independent of the Discord transport. Each function returns reply text.
pub mod github;
pub mod music;
pub mod pve;
