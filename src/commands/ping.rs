use crate::model::ShardManagerContainer;
use serenity::model::channel::Message;
use serenity::prelude::*;

// Liveness check; adds the shard heartbeat latency when the runner has measured one.
pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let latency = {
        let data = ctx.data.read().await;
        match data.get::<ShardManagerContainer>() {
            Some(shard_manager) => {
                let runners = shard_manager.runners.lock().await;
                runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
            }
            None => None,
        }
    };
    let latency = latency.map_or_else(
        || "N/A".to_string(),
        |latency| format!("{} ms", latency.as_millis()),
    );
    super::say(
        ctx,
        msg,
        format!("Pong! ✅ Bot is alive on Proxmox. Heartbeat: `{latency}`"),
    )
    .await;
}
