// Central constants for the command surface and outbound calls.
pub const COMMAND_PREFIX: &str = "!";
/// VMID of the Minecraft server VM driven by `mcup` / `mcdown` unless `APP_SERVER_VMID` overrides it.
pub const DEFAULT_APP_SERVER_VMID: u32 = 301;
pub const PVE_DEFAULT_PORT: u16 = 8006;
pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GITHUB_COMMITS_PER_PAGE: usize = 3;
pub const GITHUB_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_GITHUB_USER: &str = "Beniaminexe";
pub const DEFAULT_LAVALINK_HOST: &str = "lavalink:2333";
pub const DEFAULT_LAVALINK_PASSWORD: &str = "youshallnotpass";
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;
pub const PRESENCE_TEXT: &str = "with Proxmox & GitHub";
