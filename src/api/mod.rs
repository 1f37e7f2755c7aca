//! Adapters around the external systems the bot talks to.
//! Each one exposes a small trait so the command logic in `services` can be driven by fakes in tests.

pub mod error;
pub mod github;
pub mod lavalink;
pub mod proxmox;

pub use error::{AudioError, GithubError, PveError};
