use std::sync::Arc;

use anyhow::Context as _;
use pve_bot::handler::Handler;
use pve_bot::model::{AppState, ShardManagerContainer};
use pve_bot::Config;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use songbird::SerenityInit;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = dotenv::dotenv() {
        debug!(error = %e, "no .env file loaded");
    }

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!(error = %e, "invalid configuration, refusing to start");
            return Err(e.into());
        }
    };
    let app_state = Arc::new(AppState::new(config.clone()).context("building HTTP clients")?);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_VOICE_STATES;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .register_songbird()
        .await
        .context("Error creating the Discord client.")?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        data.insert::<AppState>(app_state);
    }

    info!(app_server_vmid = config.app_server_vmid, "starting Discord client");
    client.start().await.context("Discord client error")?;
    Ok(())
}
