//! `help` and `help <command>`: a categorized overview and per-command detail embed.
//! The same table supplies the usage strings quoted in argument-error replies.

use crate::constants::COMMAND_PREFIX;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::error;

#[derive(Clone, Copy, PartialEq, Eq)]
enum CommandCategory {
    General,
    Proxmox,
    GitHub,
    Music,
}

impl CommandCategory {
    fn name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Proxmox => "Proxmox",
            Self::GitHub => "GitHub",
            Self::Music => "Music",
        }
    }
    fn emoji(&self) -> &'static str {
        match self {
            Self::General => "🔧",
            Self::Proxmox => "🖥️",
            Self::GitHub => "🐙",
            Self::Music => "🎵",
        }
    }
}

struct CommandInfo {
    name: &'static str,
    usage: &'static str,
    description: &'static str,
    category: CommandCategory,
}

const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "ping",
        usage: "ping",
        description: "Checks the bot is alive and shows gateway latency.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "help",
        usage: "help [command]",
        description: "Shows this help menu, or details for one command.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "pve",
        usage: "pve",
        description: "CPU and RAM usage of every cluster node.",
        category: CommandCategory::Proxmox,
    },
    CommandInfo {
        name: "vms",
        usage: "vms",
        description: "Running VMs and containers, grouped by node.",
        category: CommandCategory::Proxmox,
    },
    CommandInfo {
        name: "startvm",
        usage: "startvm <vmid>",
        description: "Start a VM by ID.",
        category: CommandCategory::Proxmox,
    },
    CommandInfo {
        name: "stopvm",
        usage: "stopvm <vmid>",
        description: "Gracefully shut down a VM by ID.",
        category: CommandCategory::Proxmox,
    },
    CommandInfo {
        name: "mcup",
        usage: "mcup",
        description: "Start the Minecraft server VM.",
        category: CommandCategory::Proxmox,
    },
    CommandInfo {
        name: "mcdown",
        usage: "mcdown",
        description: "Gracefully shut down the Minecraft server VM.",
        category: CommandCategory::Proxmox,
    },
    CommandInfo {
        name: "ghcommits",
        usage: "ghcommits [user/repo or repo]",
        description: "Last 3 commits of a GitHub repository.",
        category: CommandCategory::GitHub,
    },
    CommandInfo {
        name: "play",
        usage: "play <song name or URL>",
        description: "Play a track in your voice channel, or queue it if something is playing.",
        category: CommandCategory::Music,
    },
    CommandInfo {
        name: "skip",
        usage: "skip",
        description: "Skip the current track.",
        category: CommandCategory::Music,
    },
    CommandInfo {
        name: "stop",
        usage: "stop",
        description: "Leave the voice channel.",
        category: CommandCategory::Music,
    },
];

/// Exposed for integration tests to ensure help coverage.
pub fn all_command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|c| c.name).collect()
}

/// Usage line without the prefix; unknown names echo back unchanged.
pub fn usage_of(name: &str) -> &str {
    COMMANDS
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.usage)
        .unwrap_or(name)
}

fn get_commands_in_category(category: CommandCategory) -> String {
    COMMANDS
        .iter()
        .filter(|c| c.category == category)
        .map(|c| format!("`{}{}` {}", COMMAND_PREFIX, c.usage, c.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn create_help_embed(command_name: Option<&str>) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .footer(CreateEmbedFooter::new(format!("Prefix: {COMMAND_PREFIX}")))
        .color(0x5865F2);
    match command_name {
        Some(name) => match COMMANDS.iter().find(|c| c.name == name) {
            Some(cmd) => embed
                .title(format!("{} Command: {}", cmd.category.emoji(), cmd.name))
                .field("Description", cmd.description, false)
                .field("Usage", format!("`{}{}`", COMMAND_PREFIX, cmd.usage), false),
            None => embed
                .title("Command Not Found")
                .description(format!("Sorry, I don't know a command called `{name}`."))
                .color(0xFF0000),
        },
        None => {
            let mut embed = embed.title("Help Menu").description(format!(
                "Here are my available commands. For more details, use `{COMMAND_PREFIX}help <command>`."
            ));
            for category in [
                CommandCategory::General,
                CommandCategory::Proxmox,
                CommandCategory::GitHub,
                CommandCategory::Music,
            ] {
                embed = embed.field(
                    format!("{} {}", category.emoji(), category.name()),
                    get_commands_in_category(category),
                    false,
                );
            }
            embed
        }
    }
}

pub async fn run_prefix(ctx: &Context, msg: &Message, command_name: Option<&str>) {
    let builder = CreateMessage::new()
        .embed(create_help_embed(command_name))
        .reference_message(msg);
    if let Err(e) = msg.channel_id.send_message(&ctx.http, builder).await {
        error!(target = "reply", error = ?e, "help embed send failed");
    }
}
