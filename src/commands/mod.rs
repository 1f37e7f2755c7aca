// src/commands/mod.rs
// One module per command family; each turns a parsed invocation into Discord replies.

pub mod github;
pub mod help;
pub mod music;
pub mod ping;
pub mod power;
pub mod pve;

use crate::util::chunk_reply;
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::error;

/// Send a reply to the message's channel, split to fit Discord's length limit.
/// Send failures are logged; there is nowhere else to report them.
pub async fn say(ctx: &Context, msg: &Message, text: impl Into<String>) {
    for chunk in chunk_reply(&text.into()) {
        if let Err(e) = msg.channel_id.say(&ctx.http, chunk).await {
            error!(target = "reply", channel_id = msg.channel_id.get(), error = ?e, "send failed");
            return;
        }
    }
}
