//! Thin client for the Proxmox VE HTTP API, authenticated with an API token.
//!
//! Only the handful of endpoints the bot needs are covered: node listing, guest
//! listing per node and the start/shutdown power actions. Hard power-off is not
//! exposed at all, so no caller can reach `status/stop` by accident.

use super::error::{PveError, PveResult};
use crate::config::PveConfig;
use crate::constants::PVE_DEFAULT_PORT;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use tracing::{debug, instrument};

/// One entry of `GET /nodes`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NodeStatus {
    pub node: String,
    /// Fraction of total CPU in use, 0.0 ..= 1.0.
    #[serde(default)]
    pub cpu: f64,
    #[serde(default)]
    pub mem: u64,
    #[serde(default)]
    pub maxmem: u64,
}

/// One entry of `GET /nodes/{node}/qemu` or `/lxc`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Guest {
    #[serde(deserialize_with = "vmid_from_number_or_string")]
    pub vmid: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: String,
}

impl Guest {
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestKind {
    Qemu,
    Lxc,
}

impl GuestKind {
    pub fn path(self) -> &'static str {
        match self {
            GuestKind::Qemu => "qemu",
            GuestKind::Lxc => "lxc",
        }
    }
}

/// Power actions the bot is allowed to issue. Shutdown is the graceful ACPI path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Start,
    Shutdown,
}

impl PowerAction {
    pub fn path(self) -> &'static str {
        match self {
            PowerAction::Start => "start",
            PowerAction::Shutdown => "shutdown",
        }
    }
}

#[async_trait]
pub trait PveApi: Send + Sync {
    async fn nodes(&self) -> PveResult<Vec<NodeStatus>>;
    async fn guests(&self, node: &str, kind: GuestKind) -> PveResult<Vec<Guest>>;
    /// Issue a power action against a QEMU guest; returns the task UPID.
    async fn power(&self, node: &str, vmid: u32, action: PowerAction) -> PveResult<String>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

pub struct PveClient {
    http: reqwest::Client,
    base_url: Option<String>,
    auth: String,
}

impl PveClient {
    pub fn new(cfg: &PveConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!cfg.verify_tls)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url(&cfg.host),
            auth: format!(
                "PVEAPIToken={}!{}={}",
                cfg.user, cfg.token_name, cfg.token_value
            ),
        })
    }

    fn url(&self, path: &str) -> PveResult<String> {
        let base = self.base_url.as_deref().ok_or(PveError::NotConfigured)?;
        Ok(format!("{base}{path}"))
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> PveResult<T> {
        let url = self.url(path)?;
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.auth)
            .send()
            .await?;
        read_envelope(resp).await
    }

    async fn post_data<T: DeserializeOwned>(&self, path: &str) -> PveResult<T> {
        let url = self.url(path)?;
        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, &self.auth)
            .form(&[] as &[(&str, &str)])
            .send()
            .await?;
        read_envelope(resp).await
    }
}

#[async_trait]
impl PveApi for PveClient {
    #[instrument(level = "debug", target = "pve", skip(self))]
    async fn nodes(&self) -> PveResult<Vec<NodeStatus>> {
        self.get_data("/nodes").await
    }

    #[instrument(level = "debug", target = "pve", skip(self))]
    async fn guests(&self, node: &str, kind: GuestKind) -> PveResult<Vec<Guest>> {
        self.get_data(&format!("/nodes/{node}/{}", kind.path())).await
    }

    #[instrument(level = "debug", target = "pve", skip(self))]
    async fn power(&self, node: &str, vmid: u32, action: PowerAction) -> PveResult<String> {
        let upid: String = self
            .post_data(&format!("/nodes/{node}/qemu/{vmid}/status/{}", action.path()))
            .await?;
        debug!(target = "pve", %upid, "power task queued");
        Ok(upid)
    }
}

async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> PveResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(PveError::Status {
            status: status.as_u16(),
            body: body.trim().to_string(),
        });
    }
    let bytes = resp.bytes().await?;
    let envelope: Envelope<T> =
        serde_json::from_slice(&bytes).map_err(|e| PveError::Decode(e.to_string()))?;
    envelope
        .data
        .ok_or_else(|| PveError::Decode("response has no `data` field".to_string()))
}

/// `pve.lan` -> `https://pve.lan:8006/api2/json`; an explicit scheme or port is kept.
pub fn base_url(host: &str) -> Option<String> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return None;
    }
    let (scheme, rest) = match host.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("https", host),
    };
    let authority = if rest.contains(':') {
        rest.to_string()
    } else {
        format!("{rest}:{PVE_DEFAULT_PORT}")
    };
    Some(format!("{scheme}://{authority}/api2/json"))
}

// Container listings report `vmid` as a string on some PVE releases.
fn vmid_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Str(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_adds_scheme_and_port() {
        assert_eq!(
            base_url("10.0.0.5").as_deref(),
            Some("https://10.0.0.5:8006/api2/json")
        );
        assert_eq!(
            base_url("http://pve.lan:443/").as_deref(),
            Some("http://pve.lan:443/api2/json")
        );
        assert_eq!(base_url("  "), None);
    }

    #[test]
    fn guest_accepts_string_vmid() {
        let g: Guest =
            serde_json::from_str(r#"{"vmid":"101","name":"dns","status":"running"}"#).unwrap();
        assert_eq!(g.vmid, 101);
        assert!(g.is_running());
        let g: Guest = serde_json::from_str(r#"{"vmid":100,"status":"stopped"}"#).unwrap();
        assert_eq!(g.name, None);
        assert!(!g.is_running());
    }
}
