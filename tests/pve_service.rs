mod common;

use common::{FakePve, guest, node};
use pve_bot::api::proxmox::{GuestKind, PowerAction};
use pve_bot::services::pve::{
    NO_NODES_POWER, NO_NODES_STATUS, app_server_announce, app_server_power, first_node,
    node_summary, request_power, running_guests,
};

#[tokio::test]
async fn vms_single_running_vm_on_pve1() {
    let api = FakePve::with_nodes(vec![node("pve1", 0.05, 1, 2)])
        .guests_on(
            "pve1",
            GuestKind::Qemu,
            vec![
                guest(100, Some("web"), "running"),
                guest(101, Some("db"), "stopped"),
            ],
        )
        .guests_on("pve1", GuestKind::Lxc, vec![guest(200, Some("dns"), "stopped")]);

    let reply = running_guests(&api).await;
    assert_eq!(reply, "**pve1**:\n- VM 100: web (QEMU)");
}

#[tokio::test]
async fn vms_groups_by_node_and_reports_idle_nodes() {
    let api = FakePve::with_nodes(vec![node("pve1", 0.0, 0, 0), node("pve2", 0.0, 0, 0)])
        .guests_on("pve1", GuestKind::Lxc, vec![guest(201, None, "running")]);

    let reply = running_guests(&api).await;
    assert_eq!(
        reply,
        "**pve1**:\n- CT 201: no-name (LXC)\n**pve2**: no running guests."
    );
}

#[tokio::test]
async fn empty_cluster_gets_explanations() {
    let api = FakePve::default();
    assert_eq!(node_summary(&api).await, NO_NODES_STATUS);
    assert_eq!(running_guests(&api).await, NO_NODES_STATUS);
    assert_eq!(request_power(&api, 100, PowerAction::Start).await, NO_NODES_POWER);
    assert!(api.power_calls().is_empty());
}

#[tokio::test]
async fn pve_formats_cpu_and_ram() {
    let api = FakePve::with_nodes(vec![node("pve1", 0.1234, 4 * 1024, 16 * 1024)]);
    assert_eq!(
        node_summary(&api).await,
        "**pve1**: CPU `12.3%`, RAM `25.0%`"
    );
}

#[tokio::test]
async fn api_failures_become_replies() {
    let api = FakePve {
        fail_nodes: true,
        ..Default::default()
    };
    assert!(node_summary(&api).await.starts_with("Error talking to Proxmox: `"));
    assert!(running_guests(&api).await.starts_with("Error listing VMs: `"));
    let reply = request_power(&api, 100, PowerAction::Start).await;
    assert!(reply.starts_with("❌ Failed to start VM `100`"), "{reply}");
    assert!(reply.contains("401"));
}

#[tokio::test]
async fn startvm_issues_one_start_on_first_node() {
    let api = FakePve::with_nodes(vec![node("pve1", 0.0, 0, 1), node("pve2", 0.0, 0, 1)]);
    let reply = request_power(&api, 105, PowerAction::Start).await;
    assert_eq!(reply, "▶️ Start requested for VM `105` on node `pve1`.");
    assert_eq!(api.power_calls(), vec!["power pve1 105 start"]);
}

#[tokio::test]
async fn stopvm_uses_graceful_shutdown_only() {
    let api = FakePve::with_nodes(vec![node("pve1", 0.0, 0, 1)]);
    let reply = request_power(&api, 105, PowerAction::Shutdown).await;
    assert_eq!(reply, "⏹ Shutdown requested for VM `105` on node `pve1`.");
    let calls = api.power_calls();
    assert_eq!(calls, vec!["power pve1 105 shutdown"]);
    assert!(calls.iter().all(|c| !c.ends_with(" stop")));
}

#[tokio::test]
async fn power_failure_is_reported_not_raised() {
    let api = FakePve {
        nodes: vec![node("pve1", 0.0, 0, 1)],
        fail_power: true,
        ..Default::default()
    };
    let reply = request_power(&api, 999, PowerAction::Shutdown).await;
    assert_eq!(
        reply,
        "❌ Failed to stop VM `999`: `unexpected response: VM 999 does not exist`"
    );
}

#[tokio::test]
async fn app_server_flow() {
    let api = FakePve::with_nodes(vec![node("pve1", 0.0, 0, 1)]);
    let target = first_node(&api).await.unwrap().expect("one node");
    assert_eq!(
        app_server_announce(301, PowerAction::Shutdown),
        "🟡 Shutting down Minecraft server VM (ID `301`)..."
    );
    let reply = app_server_power(&api, &target, 301, PowerAction::Shutdown).await;
    assert_eq!(
        reply,
        "🟢 Shutdown signal sent. The VM should power off shortly."
    );
    assert_eq!(api.power_calls(), vec!["power pve1 301 shutdown"]);

    let failing = FakePve {
        nodes: vec![node("pve1", 0.0, 0, 1)],
        fail_power: true,
        ..Default::default()
    };
    let reply = app_server_power(&failing, "pve1", 301, PowerAction::Start).await;
    assert!(reply.starts_with("🔴 Failed to start VM `301`:\n```"), "{reply}");
}
