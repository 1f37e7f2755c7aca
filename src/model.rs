//! What every command handler reaches through serenity's `TypeMap`: the loaded
//! config, the Proxmox and GitHub adapters, and the lazily connected Lavalink client.

use crate::api::github::GithubClient;
use crate::api::proxmox::PveClient;
use crate::config::Config;
use lavalink_rs::prelude::LavalinkClient;
use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::OnceCell;

/// Key for the shard manager; `!ping` reads the heartbeat latency through it.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Per-process bot state, inserted once as `Arc<AppState>` before the client starts.
/// The HTTP adapters are built up front; audio is wired on the first `ready`.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub config: Arc<Config>,
    pub pve: PveClient,
    pub github: GithubClient,
    /// Set by the first `ready` event; later reconnects must not build a second audio client.
    audio_initialised: AtomicBool,
    /// The Lavalink client, available once the first `ready` has connected it.
    pub lavalink: OnceCell<LavalinkClient>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            pve: PveClient::new(&config.pve)?,
            github: GithubClient::new(&config.github)?,
            config,
            audio_initialised: AtomicBool::new(false),
            lavalink: OnceCell::new(),
        })
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    /// Returns true exactly once: for the caller that gets to run audio initialisation.
    pub fn claim_audio_init(&self) -> bool {
        claim_once(&self.audio_initialised)
    }
}

/// Atomic check-and-set; true only for the first caller.
pub fn claim_once(flag: &AtomicBool) -> bool {
    flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
