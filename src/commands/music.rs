//! `!play`, `!skip`, `!stop` over the Lavalink node.
use crate::api::lavalink::LavalinkNode;
use crate::model::AppState;
use crate::services;
use serenity::model::channel::Message;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::*;
use tracing::warn;

const GUILD_ONLY: &str = "Music commands only work in a server.";
const AUDIO_NOT_READY: &str = "The audio node is not connected yet. Try again in a moment.";

async fn audio_node(ctx: &Context, app_state: &AppState) -> Option<LavalinkNode> {
    let client = app_state.lavalink.get()?.clone();
    let Some(voice) = songbird::get(ctx).await else {
        warn!(target = "music", "songbird not registered on the client");
        return None;
    };
    Some(LavalinkNode::new(client, voice))
}

/// Voice channel the author currently sits in, from the guild cache.
fn author_voice_channel(ctx: &Context, msg: &Message) -> Option<ChannelId> {
    let guild = msg.guild(&ctx.cache)?;
    guild
        .voice_states
        .get(&msg.author.id)
        .and_then(|state| state.channel_id)
}

async fn guild_and_node(
    ctx: &Context,
    msg: &Message,
    app_state: &AppState,
) -> Option<(GuildId, LavalinkNode)> {
    let Some(guild_id) = msg.guild_id else {
        super::say(ctx, msg, GUILD_ONLY).await;
        return None;
    };
    let Some(node) = audio_node(ctx, app_state).await else {
        super::say(ctx, msg, AUDIO_NOT_READY).await;
        return None;
    };
    Some((guild_id, node))
}

pub async fn run_play(ctx: &Context, msg: &Message, app_state: &AppState, query: &str) {
    let Some(guild_id) = msg.guild_id else {
        super::say(ctx, msg, GUILD_ONLY).await;
        return;
    };
    // Checked before touching the audio node at all.
    let Some(channel_id) = author_voice_channel(ctx, msg) else {
        super::say(ctx, msg, services::music::NOT_IN_VOICE).await;
        return;
    };
    let Some(node) = audio_node(ctx, app_state).await else {
        super::say(ctx, msg, AUDIO_NOT_READY).await;
        return;
    };
    let reply = services::music::play(&node, guild_id, Some(channel_id), query).await;
    super::say(ctx, msg, reply).await;
}

pub async fn run_skip(ctx: &Context, msg: &Message, app_state: &AppState) {
    let Some((guild_id, node)) = guild_and_node(ctx, msg, app_state).await else {
        return;
    };
    let reply = services::music::skip(&node, guild_id).await;
    super::say(ctx, msg, reply).await;
}

pub async fn run_stop(ctx: &Context, msg: &Message, app_state: &AppState) {
    let Some((guild_id, node)) = guild_and_node(ctx, msg, app_state).await else {
        return;
    };
    let reply = services::music::stop(&node, guild_id).await;
    super::say(ctx, msg, reply).await;
}
