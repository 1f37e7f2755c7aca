//! The three operator-facing playback verbs. Queue order and transport belong to the audio node.
//!
//! Per guild a session moves Disconnected -> Connected (idle) -> Playing; `play` while
//! Playing only grows the node's queue, `skip` lets the node advance, `stop` disconnects.

use crate::api::lavalink::AudioNode;
use serenity::model::id::{ChannelId, GuildId};
use tracing::{info, warn};

pub const NOT_IN_VOICE: &str = "You need to be in a voice channel first.";
pub const BOT_NOT_IN_VOICE: &str = "I'm not in a voice channel.";
pub const NOTHING_FOUND: &str = "I couldn't find anything for that query.";

pub async fn play<N: AudioNode>(
    node: &N,
    guild: GuildId,
    author_channel: Option<ChannelId>,
    query: &str,
) -> String {
    let Some(channel) = author_channel else {
        return NOT_IN_VOICE.to_string();
    };

    if !node.has_session(guild)
        && let Err(e) = node.connect(guild, channel).await
    {
        warn!(target = "music", guild = guild.get(), error = %e, "connect failed");
        return format!("Couldn't join your voice channel: `{e}`");
    }

    let track = match node.search(guild, query).await {
        Ok(Some(track)) => track,
        Ok(None) => return NOTHING_FOUND.to_string(),
        Err(e) => {
            warn!(target = "music", guild = guild.get(), error = %e, "search failed");
            return format!("Search failed: `{e}`");
        }
    };
    let title = N::track_title(&track).to_string();

    let outcome = match node.is_playing(guild).await {
        Ok(true) => node.enqueue(guild, track).await.map(|_| format!("Queued: `{title}`")),
        Ok(false) => node.play(guild, track).await.map(|_| format!("Now playing: `{title}`")),
        Err(e) => Err(e),
    };
    match outcome {
        Ok(reply) => {
            info!(target = "music", guild = guild.get(), %title, %reply, "play handled");
            reply
        }
        Err(e) => {
            warn!(target = "music", guild = guild.get(), error = %e, "playback failed");
            format!("Playback failed: `{e}`")
        }
    }
}

pub async fn skip<N: AudioNode>(node: &N, guild: GuildId) -> String {
    if !node.has_session(guild) {
        return BOT_NOT_IN_VOICE.to_string();
    }
    match node.skip(guild).await {
        Ok(()) => "Skipped.".to_string(),
        Err(e) => format!("Couldn't skip: `{e}`"),
    }
}

pub async fn stop<N: AudioNode>(node: &N, guild: GuildId) -> String {
    if !node.has_session(guild) {
        return BOT_NOT_IN_VOICE.to_string();
    }
    match node.leave(guild).await {
        Ok(()) => "Disconnected from voice.".to_string(),
        Err(e) => format!("Couldn't leave the voice channel: `{e}`"),
    }
}
