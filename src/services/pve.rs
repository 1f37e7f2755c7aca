//! Cluster status and power logic behind `pve`, `vms`, `startvm`, `stopvm`, `mcup` and `mcdown`.
//!
//! Every function here answers with reply text; Proxmox failures never escape as errors.
//! The cluster is treated as single-node: power actions always target the first node
//! `GET /nodes` returns.

use crate::api::PveError;
use crate::api::proxmox::{Guest, GuestKind, NodeStatus, PveApi, PowerAction};
use tracing::warn;

pub const NO_NODES_STATUS: &str = "Could not fetch nodes from Proxmox.";
pub const NO_NODES_POWER: &str = "I couldn't find any Proxmox nodes. 🤔";

fn percent(part: f64, total: f64) -> f64 {
    part / if total > 0.0 { total } else { 1.0 } * 100.0
}

pub fn format_node_line(n: &NodeStatus) -> String {
    format!(
        "**{}**: CPU `{:.1}%`, RAM `{:.1}%`",
        n.node,
        n.cpu * 100.0,
        percent(n.mem as f64, n.maxmem as f64)
    )
}

/// `pve`: one CPU/RAM line per node.
pub async fn node_summary(api: &dyn PveApi) -> String {
    match api.nodes().await {
        Ok(nodes) if nodes.is_empty() => NO_NODES_STATUS.to_string(),
        Ok(nodes) => nodes
            .iter()
            .map(format_node_line)
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => {
            warn!(target = "pve", error = %e, "node listing failed");
            format!("Error talking to Proxmox: `{e}`")
        }
    }
}

/// Render one node's section of the `vms` listing from its raw guest lists.
pub fn format_node_guests(node: &str, qemu: &[Guest], lxc: &[Guest]) -> Vec<String> {
    let running_vms: Vec<&Guest> = qemu.iter().filter(|g| g.is_running()).collect();
    let running_cts: Vec<&Guest> = lxc.iter().filter(|g| g.is_running()).collect();
    if running_vms.is_empty() && running_cts.is_empty() {
        return vec![format!("**{node}**: no running guests.")];
    }
    let mut lines = vec![format!("**{node}**:")];
    for vm in running_vms {
        lines.push(format!(
            "- VM {}: {} (QEMU)",
            vm.vmid,
            vm.name.as_deref().unwrap_or("no-name")
        ));
    }
    for ct in running_cts {
        lines.push(format!(
            "- CT {}: {} (LXC)",
            ct.vmid,
            ct.name.as_deref().unwrap_or("no-name")
        ));
    }
    lines
}

/// `vms`: running guests grouped by node.
pub async fn running_guests(api: &dyn PveApi) -> String {
    match collect_running_guests(api).await {
        Ok(lines) if lines.is_empty() => NO_NODES_STATUS.to_string(),
        Ok(lines) => lines.join("\n"),
        Err(e) => {
            warn!(target = "pve", error = %e, "guest listing failed");
            format!("Error listing VMs: `{e}`")
        }
    }
}

async fn collect_running_guests(api: &dyn PveApi) -> Result<Vec<String>, PveError> {
    let mut lines = Vec::new();
    for node in api.nodes().await? {
        let qemu = api.guests(&node.node, GuestKind::Qemu).await?;
        let lxc = api.guests(&node.node, GuestKind::Lxc).await?;
        lines.extend(format_node_guests(&node.node, &qemu, &lxc));
    }
    Ok(lines)
}

/// Name of the node power actions are sent to, `None` when the cluster reports no nodes.
pub async fn first_node(api: &dyn PveApi) -> Result<Option<String>, PveError> {
    Ok(api.nodes().await?.into_iter().next().map(|n| n.node))
}

/// `startvm` / `stopvm`: one power request against the first node.
pub async fn request_power(api: &dyn PveApi, vmid: u32, action: PowerAction) -> String {
    let result = async {
        let Some(node) = first_node(api).await? else {
            return Ok(None);
        };
        api.power(&node, vmid, action).await?;
        Ok::<_, PveError>(Some(node))
    }
    .await;
    match (result, action) {
        (Ok(None), _) => NO_NODES_POWER.to_string(),
        (Ok(Some(node)), PowerAction::Start) => {
            format!("▶️ Start requested for VM `{vmid}` on node `{node}`.")
        }
        (Ok(Some(node)), PowerAction::Shutdown) => {
            format!("⏹ Shutdown requested for VM `{vmid}` on node `{node}`.")
        }
        (Err(e), PowerAction::Start) => {
            warn!(target = "pve", vmid, error = %e, "start failed");
            format!("❌ Failed to start VM `{vmid}`: `{e}`")
        }
        (Err(e), PowerAction::Shutdown) => {
            warn!(target = "pve", vmid, error = %e, "shutdown failed");
            format!("❌ Failed to stop VM `{vmid}`: `{e}`")
        }
    }
}

pub fn app_server_announce(vmid: u32, action: PowerAction) -> String {
    match action {
        PowerAction::Start => format!("🟡 Starting Minecraft server VM (ID `{vmid}`)..."),
        PowerAction::Shutdown => format!("🟡 Shutting down Minecraft server VM (ID `{vmid}`)..."),
    }
}

pub fn app_server_failure(vmid: u32, action: PowerAction, e: &PveError) -> String {
    match action {
        PowerAction::Start => format!("🔴 Failed to start VM `{vmid}`:\n```{e}```"),
        PowerAction::Shutdown => format!("🔴 Failed to shut down VM `{vmid}`:\n```{e}```"),
    }
}

/// Second half of `mcup` / `mcdown`, once the node is known and the announcement is out.
pub async fn app_server_power(
    api: &dyn PveApi,
    node: &str,
    vmid: u32,
    action: PowerAction,
) -> String {
    match (api.power(node, vmid, action).await, action) {
        (Ok(_), PowerAction::Start) => "🟢 Minecraft server VM is starting up!".to_string(),
        (Ok(_), PowerAction::Shutdown) => {
            "🟢 Shutdown signal sent. The VM should power off shortly.".to_string()
        }
        (Err(e), _) => {
            warn!(target = "pve", vmid, error = %e, "app server power action failed");
            app_server_failure(vmid, action, &e)
        }
    }
}
