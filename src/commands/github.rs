use crate::model::AppState;
use crate::services;
use serenity::model::channel::Message;
use serenity::prelude::*;

// `!ghcommits [user/repo or repo]`
pub async fn run_prefix(ctx: &Context, msg: &Message, app_state: &AppState, repo: Option<&str>) {
    let reply =
        services::github::recent_commits(&app_state.github, &app_state.config.github, repo).await;
    super::say(ctx, msg, reply).await;
}
