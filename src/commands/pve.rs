//! `!pve` and `!vms`.
use crate::model::AppState;
use crate::services;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub async fn run_status(ctx: &Context, msg: &Message, app_state: &AppState) {
    let reply = services::pve::node_summary(&app_state.pve).await;
    super::say(ctx, msg, reply).await;
}

pub async fn run_vms(ctx: &Context, msg: &Message, app_state: &AppState) {
    let reply = services::pve::running_guests(&app_state.pve).await;
    super::say(ctx, msg, reply).await;
}
