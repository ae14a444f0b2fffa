use std::{env, str::FromStr};

use ferry_shared::MAX_DATAGRAM_BYTES;

use crate::error::ConfigError;

/// Which kind of build is connecting. Browser builds cannot reach the
/// primary port and are pointed at the alternate one instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetProfile {
    #[default]
    Standalone,
    Web,
}

impl FromStr for TargetProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standalone" => Ok(TargetProfile::Standalone),
            "web" => Ok(TargetProfile::Web),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}

/// Contains Config properties which will be used by a Client.
/// Resolved once at startup; a running session never re-reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host name or IP of the server
    pub server_addr: String,
    /// Port used by standalone builds
    pub port: u16,
    /// Alternate port for constrained network environments
    pub web_port: u16,
    /// Selects between `port` and `web_port`
    pub profile: TargetProfile,
    /// Capacity of every datagram the codec writes
    pub max_datagram_size: usize,
    /// Peer count the transport topology is sized for. Shared with the server.
    pub max_peers: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1".to_string(),
            port: 62000,
            web_port: 62001,
            profile: TargetProfile::Standalone,
            max_datagram_size: MAX_DATAGRAM_BYTES,
            max_peers: 100,
        }
    }
}

const SERVER_ADDR_KEY: &str = "FERRY_SERVER_ADDR";
const PORT_KEY: &str = "FERRY_PORT";
const WEB_PORT_KEY: &str = "FERRY_WEB_PORT";
const PROFILE_KEY: &str = "FERRY_PROFILE";
const MAX_DATAGRAM_SIZE_KEY: &str = "FERRY_MAX_DATAGRAM_SIZE";
const MAX_PEERS_KEY: &str = "FERRY_MAX_PEERS";

impl ClientConfig {
    /// Defaults overridden by any `FERRY_*` variables in the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `FERRY_*` key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(SERVER_ADDR_KEY) {
            config.server_addr = addr;
        }
        if let Some(port) = parse(&lookup, PORT_KEY)? {
            config.port = port;
        }
        if let Some(port) = parse(&lookup, WEB_PORT_KEY)? {
            config.web_port = port;
        }
        if let Some(profile) = lookup(PROFILE_KEY) {
            config.profile = profile.parse()?;
        }
        if let Some(size) = parse(&lookup, MAX_DATAGRAM_SIZE_KEY)? {
            config.max_datagram_size = size;
        }
        if let Some(peers) = parse(&lookup, MAX_PEERS_KEY)? {
            config.max_peers = peers;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_datagram_size == 0 {
            return Err(ConfigError::Zero {
                key: MAX_DATAGRAM_SIZE_KEY,
            });
        }
        if self.max_peers == 0 {
            return Err(ConfigError::Zero { key: MAX_PEERS_KEY });
        }
        Ok(())
    }

    /// Port selected by the target profile
    pub fn target_port(&self) -> u16 {
        match self.profile {
            TargetProfile::Standalone => self.port,
            TargetProfile::Web => self.web_port,
        }
    }

    pub fn with_server(mut self, server_addr: impl Into<String>) -> Self {
        self.server_addr = server_addr.into();
        self
    }

    pub fn with_profile(mut self, profile: TargetProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_max_datagram_size(mut self, size: usize) -> Self {
        self.max_datagram_size = size;
        self
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
