//! Adapter error types. Command handlers turn every one of these into a reply.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PveError {
    #[error("PVE_HOST is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Proxmox returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

pub type PveResult<T> = Result<T, PveError>;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("could not join the voice channel: {0}")]
    Join(String),
    #[error("audio node error: {0}")]
    Node(String),
}

pub type AudioResult<T> = Result<T, AudioError>;
