//! Audio playback through a Lavalink node.
//!
//! Songbird only carries the Discord voice gateway handshake; the node streams the
//! audio and lavalink-rs owns each guild's player and its queue. This module adds
//! nothing to that queue logic, it only maps the bot's verbs onto the client.

use super::error::{AudioError, AudioResult};
use crate::config::LavalinkConfig;
use async_trait::async_trait;
use lavalink_rs::model::events;
use lavalink_rs::model::track::TrackData;
use lavalink_rs::prelude::*;
use serenity::model::id::{ChannelId, GuildId, UserId};
use songbird::Songbird;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Operations the music commands need from an audio backend, keyed per guild.
#[async_trait]
pub trait AudioNode: Send + Sync {
    type Track: Send + Sync;

    fn track_title(track: &Self::Track) -> &str;

    /// Whether a playback session (voice connection + player) exists for the guild.
    fn has_session(&self, guild: GuildId) -> bool;
    async fn connect(&self, guild: GuildId, channel: ChannelId) -> AudioResult<()>;
    /// First match for a free-text query or direct URL.
    async fn search(&self, guild: GuildId, query: &str) -> AudioResult<Option<Self::Track>>;
    async fn is_playing(&self, guild: GuildId) -> AudioResult<bool>;
    async fn play(&self, guild: GuildId, track: Self::Track) -> AudioResult<()>;
    async fn enqueue(&self, guild: GuildId, track: Self::Track) -> AudioResult<()>;
    async fn skip(&self, guild: GuildId) -> AudioResult<()>;
    async fn leave(&self, guild: GuildId) -> AudioResult<()>;
}

/// Connect the Lavalink client for this bot user. Node failures are retried by the client itself.
pub async fn connect_node(cfg: &LavalinkConfig, bot_user: UserId) -> LavalinkClient {
    let node = NodeBuilder {
        hostname: cfg.host.clone(),
        is_ssl: cfg.ssl,
        events: events::Events::default(),
        password: cfg.password.clone(),
        user_id: bot_user.into(),
        session_id: None,
    };
    info!(target = "music", host = %cfg.host, ssl = cfg.ssl, "connecting lavalink node");
    LavalinkClient::new(
        events::Events::default(),
        vec![node],
        NodeDistributionStrategy::round_robin(),
    )
    .await
}

/// URLs go to the node untouched, anything else becomes a YouTube search.
pub fn search_query(query: &str) -> String {
    let query = query.trim();
    if query.starts_with("http://") || query.starts_with("https://") {
        query.to_string()
    } else {
        format!("ytsearch:{query}")
    }
}

pub struct LavalinkNode {
    client: LavalinkClient,
    voice: Arc<Songbird>,
}

impl LavalinkNode {
    pub fn new(client: LavalinkClient, voice: Arc<Songbird>) -> Self {
        Self { client, voice }
    }

    fn player(&self, guild: GuildId) -> AudioResult<PlayerContext> {
        self.client
            .get_player_context(guild)
            .ok_or_else(|| AudioError::Node("no player for this guild".to_string()))
    }
}

fn node_err(e: impl std::fmt::Display) -> AudioError {
    AudioError::Node(e.to_string())
}

#[async_trait]
impl AudioNode for LavalinkNode {
    type Track = TrackData;

    fn track_title(track: &TrackData) -> &str {
        &track.info.title
    }

    // A songbird call without a player still holds the bot in the channel; `stop` must see it.
    fn has_session(&self, guild: GuildId) -> bool {
        self.client.get_player_context(guild).is_some() || self.voice.get(guild).is_some()
    }

    #[instrument(level = "debug", target = "music", skip(self))]
    async fn connect(&self, guild: GuildId, channel: ChannelId) -> AudioResult<()> {
        let (connection_info, _call) = self
            .voice
            .join_gateway(guild, channel)
            .await
            .map_err(|e| AudioError::Join(e.to_string()))?;
        if let Err(e) = self
            .client
            .create_player_context(guild, connection_info)
            .await
        {
            warn!(target = "music", guild = guild.get(), error = %e, "player creation failed, leaving voice");
            if let Err(leave_err) = self.voice.remove(guild).await {
                warn!(target = "music", guild = guild.get(), error = %leave_err, "voice cleanup failed");
            }
            return Err(node_err(e));
        }
        debug!(target = "music", guild = guild.get(), "player created");
        Ok(())
    }

    #[instrument(level = "debug", target = "music", skip(self))]
    async fn search(&self, guild: GuildId, query: &str) -> AudioResult<Option<TrackData>> {
        let loaded = self
            .client
            .load_tracks(guild, &search_query(query))
            .await
            .map_err(node_err)?;
        Ok(match loaded.data {
            Some(TrackLoadData::Track(track)) => Some(track),
            Some(TrackLoadData::Search(results)) => results.into_iter().next(),
            Some(TrackLoadData::Playlist(playlist)) => playlist.tracks.into_iter().next(),
            _ => None,
        })
    }

    async fn is_playing(&self, guild: GuildId) -> AudioResult<bool> {
        let player = self.player(guild)?.get_player().await.map_err(node_err)?;
        Ok(player.track.is_some())
    }

    async fn play(&self, guild: GuildId, track: TrackData) -> AudioResult<()> {
        self.player(guild)?
            .play_now(&track)
            .await
            .map_err(node_err)?;
        Ok(())
    }

    async fn enqueue(&self, guild: GuildId, track: TrackData) -> AudioResult<()> {
        self.player(guild)?
            .get_queue()
            .push_to_back(track)
            .map_err(node_err)
    }

    async fn skip(&self, guild: GuildId) -> AudioResult<()> {
        self.player(guild)?.skip().map_err(node_err)
    }

    #[instrument(level = "debug", target = "music", skip(self))]
    async fn leave(&self, guild: GuildId) -> AudioResult<()> {
        // Both halves are torn down even if the first fails; the first error is reported.
        let player = if self.client.get_player_context(guild).is_some() {
            self.client.delete_player(guild).await.map_err(node_err)
        } else {
            Ok(())
        };
        let voice = if self.voice.get(guild).is_some() {
            self.voice
                .remove(guild)
                .await
                .map_err(|e| AudioError::Join(e.to_string()))
        } else {
            Ok(())
        };
        player.and(voice)
    }
}

#[cfg(test)]
mod tests {
    use super::search_query;

    #[test]
    fn urls_pass_through_and_text_is_searched() {
        assert_eq!(
            search_query(" https://youtu.be/dQw4w9WgXcQ "),
            "https://youtu.be/dQw4w9WgXcQ"
        );
        assert_eq!(search_query("lofi beats"), "ytsearch:lofi beats");
    }
}
