//! Recording fakes for the adapter traits.
#![allow(dead_code)]

use async_trait::async_trait;
use pve_bot::api::error::{AudioError, AudioResult, GithubError, PveError, PveResult};
use pve_bot::api::github::{CommitListing, CommitSource};
use pve_bot::api::lavalink::AudioNode;
use pve_bot::api::proxmox::{Guest, GuestKind, NodeStatus, PowerAction, PveApi};
use serenity::model::id::{ChannelId, GuildId};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn node(name: &str, cpu: f64, mem: u64, maxmem: u64) -> NodeStatus {
    NodeStatus {
        node: name.to_string(),
        cpu,
        mem,
        maxmem,
    }
}

pub fn guest(vmid: u32, name: Option<&str>, status: &str) -> Guest {
    Guest {
        vmid,
        name: name.map(str::to_string),
        status: status.to_string(),
    }
}

#[derive(Default)]
pub struct FakePve {
    pub nodes: Vec<NodeStatus>,
    pub guests: HashMap<(String, &'static str), Vec<Guest>>,
    pub fail_nodes: bool,
    pub fail_power: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakePve {
    pub fn with_nodes(nodes: Vec<NodeStatus>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }

    pub fn guests_on(mut self, node: &str, kind: GuestKind, guests: Vec<Guest>) -> Self {
        self.guests.insert((node.to_string(), kind.path()), guests);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn power_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("power "))
            .collect()
    }
}

#[async_trait]
impl PveApi for FakePve {
    async fn nodes(&self) -> PveResult<Vec<NodeStatus>> {
        self.calls.lock().unwrap().push("nodes".to_string());
        if self.fail_nodes {
            return Err(PveError::Status {
                status: 401,
                body: "authentication failure".to_string(),
            });
        }
        Ok(self.nodes.clone())
    }

    async fn guests(&self, node: &str, kind: GuestKind) -> PveResult<Vec<Guest>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("guests {node} {}", kind.path()));
        Ok(self
            .guests
            .get(&(node.to_string(), kind.path()))
            .cloned()
            .unwrap_or_default())
    }

    async fn power(&self, node: &str, vmid: u32, action: PowerAction) -> PveResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("power {node} {vmid} {}", action.path()));
        if self.fail_power {
            return Err(PveError::Decode("VM 999 does not exist".to_string()));
        }
        Ok(format!("UPID:{node}:0001:qm{}:{vmid}", action.path()))
    }
}

pub struct FakeCommits {
    pub response: Option<CommitListing>,
    pub calls: Mutex<Vec<(String, usize)>>,
}

impl FakeCommits {
    pub fn answering(listing: CommitListing) -> Self {
        Self {
            response: Some(listing),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Simulates a transport failure by building a real reqwest error from a bad URL.
    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommitSource for FakeCommits {
    async fn recent_commits(
        &self,
        full_repo: &str,
        count: usize,
    ) -> Result<CommitListing, GithubError> {
        self.calls
            .lock()
            .unwrap()
            .push((full_repo.to_string(), count));
        match &self.response {
            Some(listing) => Ok(listing.clone()),
            None => {
                let err = reqwest::Client::new()
                    .get("not a url")
                    .send()
                    .await
                    .expect_err("relative URL must fail");
                Err(GithubError::Http(err))
            }
        }
    }
}

#[derive(Default)]
pub struct AudioState {
    /// Player exists on the node.
    pub session: bool,
    /// Bot sits in the voice channel.
    pub voice_joined: bool,
    pub current: Option<String>,
    pub queue: Vec<String>,
    pub calls: Vec<String>,
}

/// Tracks are plain titles; a query of `nothing` finds no results.
/// `fail_connect` joins voice but fails to create the player; `stuck_in_voice`
/// additionally makes leaving the channel after that failure fail.
#[derive(Default)]
pub struct FakeAudio {
    pub state: Mutex<AudioState>,
    pub fail_connect: bool,
    pub stuck_in_voice: bool,
}

impl FakeAudio {
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl AudioNode for FakeAudio {
    type Track = String;

    fn track_title(track: &String) -> &str {
        track
    }

    fn has_session(&self, _guild: GuildId) -> bool {
        let state = self.state.lock().unwrap();
        state.session || state.voice_joined
    }

    async fn connect(&self, _guild: GuildId, channel: ChannelId) -> AudioResult<()> {
        self.record(format!("connect {}", channel.get()));
        let mut state = self.state.lock().unwrap();
        state.voice_joined = true;
        if self.fail_connect {
            state.voice_joined = self.stuck_in_voice;
            return Err(AudioError::Node("missing permissions".to_string()));
        }
        state.session = true;
        Ok(())
    }

    async fn search(&self, _guild: GuildId, query: &str) -> AudioResult<Option<String>> {
        self.record(format!("search {query}"));
        Ok((query != "nothing").then(|| format!("{query} (Official Video)")))
    }

    async fn is_playing(&self, _guild: GuildId) -> AudioResult<bool> {
        Ok(self.state.lock().unwrap().current.is_some())
    }

    async fn play(&self, _guild: GuildId, track: String) -> AudioResult<()> {
        self.record(format!("play {track}"));
        self.state.lock().unwrap().current = Some(track);
        Ok(())
    }

    async fn enqueue(&self, _guild: GuildId, track: String) -> AudioResult<()> {
        self.record(format!("enqueue {track}"));
        self.state.lock().unwrap().queue.push(track);
        Ok(())
    }

    async fn skip(&self, _guild: GuildId) -> AudioResult<()> {
        self.record("skip".to_string());
        let mut state = self.state.lock().unwrap();
        state.current = if state.queue.is_empty() {
            None
        } else {
            Some(state.queue.remove(0))
        };
        Ok(())
    }

    async fn leave(&self, _guild: GuildId) -> AudioResult<()> {
        self.record("leave".to_string());
        let mut state = self.state.lock().unwrap();
        let calls = std::mem::take(&mut state.calls);
        *state = AudioState {
            calls,
            ..Default::default()
        };
        Ok(())
    }
}
