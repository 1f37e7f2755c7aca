use crate::api::lavalink::connect_node;
use crate::commands;
use crate::constants::{COMMAND_PREFIX, PRESENCE_TEXT};
use crate::model::AppState;
use serenity::async_trait;
use serenity::client::Context;
use serenity::gateway::ActivityData;
use serenity::model::{channel::Message, gateway::Ready};
use serenity::prelude::EventHandler;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Pve,
    Vms,
    GhCommits,
    StartVm,
    StopVm,
    Play,
    Skip,
    Stop,
    McUp,
    McDown,
    Help,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ping" => Ok(Command::Ping),
            "pve" => Ok(Command::Pve),
            "vms" => Ok(Command::Vms),
            "ghcommits" => Ok(Command::GhCommits),
            "startvm" => Ok(Command::StartVm),
            "stopvm" => Ok(Command::StopVm),
            "play" => Ok(Command::Play),
            "skip" => Ok(Command::Skip),
            "stop" => Ok(Command::Stop),
            "mcup" => Ok(Command::McUp),
            "mcdown" => Ok(Command::McDown),
            "help" => Ok(Command::Help),
            _ => Ok(Command::Unknown),
        }
    }
}

/// A recognised command with its arguments already converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Ping,
    Pve,
    Vms,
    GhCommits(Option<String>),
    StartVm(u32),
    StopVm(u32),
    Play(String),
    Skip,
    Stop,
    McUp,
    McDown,
    Help(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    Missing { command: &'static str },
    NotAnId { command: &'static str, value: String },
}

impl ArgError {
    /// Usage-style reply shown to the operator.
    pub fn reply(&self) -> String {
        match self {
            ArgError::Missing { command } => {
                format!("Usage: `{COMMAND_PREFIX}{}`", commands::help::usage_of(command))
            }
            ArgError::NotAnId { command, value } => format!(
                "`{value}` is not a valid VM ID. Usage: `{COMMAND_PREFIX}{}`",
                commands::help::usage_of(command)
            ),
        }
    }
}

fn parse_vmid(command: &'static str, raw: Option<&str>) -> Result<u32, ArgError> {
    let raw = raw.ok_or(ArgError::Missing { command })?;
    raw.parse::<u32>().map_err(|_| ArgError::NotAnId {
        command,
        value: raw.to_string(),
    })
}

/// `None` when the message is not a command this bot knows; unknown commands are ignored.
pub fn parse_invocation(prefix: &str, content: &str) -> Option<Result<Invocation, ArgError>> {
    let body = content.strip_prefix(prefix)?.trim_start();
    let (name, rest) = body
        .split_once(char::is_whitespace)
        .unwrap_or((body, ""));
    let rest = rest.trim();
    let first_arg = rest.split_whitespace().next();

    let invocation = match Command::from_str(name).unwrap_or(Command::Unknown) {
        Command::Unknown => return None,
        Command::Ping => Ok(Invocation::Ping),
        Command::Pve => Ok(Invocation::Pve),
        Command::Vms => Ok(Invocation::Vms),
        Command::GhCommits => Ok(Invocation::GhCommits(first_arg.map(str::to_string))),
        Command::StartVm => parse_vmid("startvm", first_arg).map(Invocation::StartVm),
        Command::StopVm => parse_vmid("stopvm", first_arg).map(Invocation::StopVm),
        Command::Play if rest.is_empty() => Err(ArgError::Missing { command: "play" }),
        Command::Play => Ok(Invocation::Play(rest.to_string())),
        Command::Skip => Ok(Invocation::Skip),
        Command::Stop => Ok(Invocation::Stop),
        Command::McUp => Ok(Invocation::McUp),
        Command::McDown => Ok(Invocation::McDown),
        Command::Help => Ok(Invocation::Help(first_arg.map(str::to_string))),
    };
    Some(invocation)
}

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(parsed) = parse_invocation(COMMAND_PREFIX, &msg.content) else {
            return;
        };
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            error!(target = "handler", "AppState missing from TypeMap");
            return;
        };
        let invocation = match parsed {
            Ok(invocation) => invocation,
            Err(e) => {
                debug!(target = "handler", error = ?e, "argument parse failed");
                commands::say(&ctx, &msg, e.reply()).await;
                return;
            }
        };
        debug!(target = "handler", user_id = msg.author.id.get(), ?invocation, "dispatch");
        match invocation {
            Invocation::Ping => commands::ping::run_prefix(&ctx, &msg).await,
            Invocation::Pve => commands::pve::run_status(&ctx, &msg, &app_state).await,
            Invocation::Vms => commands::pve::run_vms(&ctx, &msg, &app_state).await,
            Invocation::GhCommits(repo) => {
                commands::github::run_prefix(&ctx, &msg, &app_state, repo.as_deref()).await
            }
            Invocation::StartVm(vmid) => {
                commands::power::run_startvm(&ctx, &msg, &app_state, vmid).await
            }
            Invocation::StopVm(vmid) => {
                commands::power::run_stopvm(&ctx, &msg, &app_state, vmid).await
            }
            Invocation::McUp => commands::power::run_mcup(&ctx, &msg, &app_state).await,
            Invocation::McDown => commands::power::run_mcdown(&ctx, &msg, &app_state).await,
            Invocation::Play(query) => {
                commands::music::run_play(&ctx, &msg, &app_state, &query).await
            }
            Invocation::Skip => commands::music::run_skip(&ctx, &msg, &app_state).await,
            Invocation::Stop => commands::music::run_stop(&ctx, &msg, &app_state).await,
            Invocation::Help(name) => commands::help::run_prefix(&ctx, &msg, name.as_deref()).await,
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(target = "handler", user = %ready.user.name, id = ready.user.id.get(), "connected and ready");
        ctx.set_activity(Some(ActivityData::playing(PRESENCE_TEXT)));

        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            error!(target = "handler", "AppState missing from TypeMap");
            return;
        };
        // Discord reconnects fire `ready` again.
        if !app_state.claim_audio_init() {
            debug!(target = "handler", "audio already initialised, skipping");
            return;
        }
        let client = connect_node(&app_state.config.lavalink, ready.user.id).await;
        if app_state.lavalink.set(client).is_err() {
            warn!(target = "handler", "lavalink client was already set");
            return;
        }
        info!(target = "handler", "Lavalink node connected.");
    }
}
