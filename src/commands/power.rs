//! Guest power commands: `startvm`, `stopvm` and the fixed-VMID `mcup` / `mcdown`.
use crate::api::proxmox::PowerAction;
use crate::model::AppState;
use crate::services::pve::{
    NO_NODES_POWER, app_server_announce, app_server_failure, app_server_power, first_node,
    request_power,
};
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::info;

pub async fn run_startvm(ctx: &Context, msg: &Message, app_state: &AppState, vmid: u32) {
    info!(target = "pve", vmid, user_id = msg.author.id.get(), "start requested");
    let reply = request_power(&app_state.pve, vmid, PowerAction::Start).await;
    super::say(ctx, msg, reply).await;
}

pub async fn run_stopvm(ctx: &Context, msg: &Message, app_state: &AppState, vmid: u32) {
    info!(target = "pve", vmid, user_id = msg.author.id.get(), "shutdown requested");
    let reply = request_power(&app_state.pve, vmid, PowerAction::Shutdown).await;
    super::say(ctx, msg, reply).await;
}

pub async fn run_mcup(ctx: &Context, msg: &Message, app_state: &AppState) {
    app_server(ctx, msg, app_state, PowerAction::Start).await;
}

pub async fn run_mcdown(ctx: &Context, msg: &Message, app_state: &AppState) {
    app_server(ctx, msg, app_state, PowerAction::Shutdown).await;
}

// Announce first, then issue the action; the node is resolved before announcing.
async fn app_server(ctx: &Context, msg: &Message, app_state: &AppState, action: PowerAction) {
    let vmid = app_state.config.app_server_vmid;
    info!(target = "pve", vmid, ?action, user_id = msg.author.id.get(), "app server power");
    match first_node(&app_state.pve).await {
        Ok(Some(node)) => {
            super::say(ctx, msg, app_server_announce(vmid, action)).await;
            let reply = app_server_power(&app_state.pve, &node, vmid, action).await;
            super::say(ctx, msg, reply).await;
        }
        Ok(None) => super::say(ctx, msg, NO_NODES_POWER).await,
        Err(e) => super::say(ctx, msg, app_server_failure(vmid, action, &e)).await,
    }
}
