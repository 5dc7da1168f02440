//! Connection configuration: endpoints, retry policy, admin mode.

use crate::error::Error;
use serde::{Deserialize, Serialize};

const DEFAULT_RETRY_TIME_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 5;
const DEFAULT_KA_INTERVAL_SECS: u64 = 30;
pub(crate) const PING_INTERVAL_SECS: u64 = 10;
pub(crate) const PING_WAIT_SECS: u64 = 5;

/// A single Janus server address, as accepted by [`Configuration`].
///
/// `url` carries the scheme that selects the transport: `ws://`/`wss://` for
/// WebSocket, `file://` for a UNIX datagram socket path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apisecret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Endpoint {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            apisecret: None,
            token: None,
        }
    }
}

impl<S: Into<String>> From<S> for Endpoint {
    fn from(url: S) -> Self {
        Self::new(url)
    }
}

/// Top-level connection configuration.
///
/// Validated eagerly: [`Configuration::new`] and [`Configuration::validate`]
/// reject malformed input at construction time rather than failing later
/// inside the reconnect loop.
///
/// A process may juggle more than one logical Janus target (e.g. one per
/// tenant). `connect` (spec §6.3) accepts either a single `Configuration` or
/// a list of them; `server_key` is how a list entry is picked out by name
/// instead of by position.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub endpoints: Vec<Endpoint>,
    pub retry_time_secs: u64,
    pub max_retries: u32,
    pub is_admin: bool,
    pub ka_interval_secs: u64,
    pub ws_options: Option<crate::transport::websocket::WebSocketOptions>,
    pub server_key: Option<String>,
}

impl Configuration {
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, Error> {
        let config = Self {
            endpoints,
            retry_time_secs: DEFAULT_RETRY_TIME_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            is_admin: false,
            ka_interval_secs: DEFAULT_KA_INTERVAL_SECS,
            ws_options: None,
            server_key: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_retry_time_secs(mut self, retry_time_secs: u64) -> Self {
        self.retry_time_secs = retry_time_secs;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    pub fn with_ka_interval_secs(mut self, ka_interval_secs: u64) -> Self {
        self.ka_interval_secs = ka_interval_secs;
        self
    }

    pub fn with_ws_options(
        mut self,
        ws_options: crate::transport::websocket::WebSocketOptions,
    ) -> Self {
        self.ws_options = Some(ws_options);
        self
    }

    /// Tags this configuration so a multi-configuration `connect` call can
    /// select it by name instead of by list position.
    pub fn with_server_key<S: Into<String>>(mut self, server_key: S) -> Self {
        self.server_key = Some(server_key.into());
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.endpoints.is_empty() {
            return Err(Error::ConfigInvalid(
                "configuration must list at least one endpoint".into(),
            ));
        }
        for endpoint in &self.endpoints {
            if endpoint.url.is_empty() {
                return Err(Error::ConfigInvalid("endpoint is missing a url".into()));
            }
        }
        if self.max_retries == 0 {
            return Err(Error::ConfigInvalid("max_retries must be at least 1".into()));
        }
        Ok(())
    }
}

/// Selects one [`Configuration`] out of the list passed to `connect` (spec
/// §6.3). Omitted ⇒ [`ConnectKey::Index(0)`].
#[derive(Debug, Clone)]
pub enum ConnectKey {
    Index(usize),
    ServerKey(String),
}

impl Default for ConnectKey {
    fn default() -> Self {
        ConnectKey::Index(0)
    }
}

impl From<usize> for ConnectKey {
    fn from(index: usize) -> Self {
        ConnectKey::Index(index)
    }
}

impl From<String> for ConnectKey {
    fn from(server_key: String) -> Self {
        ConnectKey::ServerKey(server_key)
    }
}

impl From<&str> for ConnectKey {
    fn from(server_key: &str) -> Self {
        ConnectKey::ServerKey(server_key.to_owned())
    }
}

/// Lets `connect` accept either one [`Configuration`] or a list of them
/// (spec §6.3).
pub trait IntoConfigurations {
    fn into_configurations(self) -> Vec<Configuration>;
}

impl IntoConfigurations for Configuration {
    fn into_configurations(self) -> Vec<Configuration> {
        vec![self]
    }
}

impl IntoConfigurations for Vec<Configuration> {
    fn into_configurations(self) -> Vec<Configuration> {
        self
    }
}

/// Picks the configuration `key` names out of `configs`, defaulting to index
/// 0 when `key` is `None` (spec §6.3).
pub(crate) fn select_configuration(
    configs: Vec<Configuration>,
    key: Option<ConnectKey>,
) -> Result<Configuration, Error> {
    let key = key.unwrap_or_default();
    let index = match &key {
        ConnectKey::Index(index) => *index,
        ConnectKey::ServerKey(server_key) => configs
            .iter()
            .position(|config| config.server_key.as_deref() == Some(server_key.as_str()))
            .ok_or_else(|| {
                Error::ConfigInvalid(format!("no configuration with server_key {server_key:?}"))
            })?,
    };
    configs.into_iter().nth(index).ok_or_else(|| {
        Error::ConfigInvalid(format!("no configuration at index {index}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_endpoint_list() {
        let err = Configuration::new(vec![]).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid(_)));
    }

    #[test]
    fn select_configuration_defaults_to_index_zero() {
        let configs = vec![
            Configuration::new(vec![Endpoint::new("ws://a")]).unwrap(),
            Configuration::new(vec![Endpoint::new("ws://b")]).unwrap(),
        ];
        let selected = select_configuration(configs, None).unwrap();
        assert_eq!(selected.endpoints[0].url, "ws://a");
    }

    #[test]
    fn select_configuration_by_index() {
        let configs = vec![
            Configuration::new(vec![Endpoint::new("ws://a")]).unwrap(),
            Configuration::new(vec![Endpoint::new("ws://b")]).unwrap(),
        ];
        let selected = select_configuration(configs, Some(ConnectKey::Index(1))).unwrap();
        assert_eq!(selected.endpoints[0].url, "ws://b");
    }

    #[test]
    fn select_configuration_by_server_key() {
        let configs = vec![
            Configuration::new(vec![Endpoint::new("ws://a")])
                .unwrap()
                .with_server_key("tenant-a"),
            Configuration::new(vec![Endpoint::new("ws://b")])
                .unwrap()
                .with_server_key("tenant-b"),
        ];
        let selected =
            select_configuration(configs, Some(ConnectKey::from("tenant-b"))).unwrap();
        assert_eq!(selected.endpoints[0].url, "ws://b");
    }

    #[test]
    fn select_configuration_rejects_unknown_server_key() {
        let configs = vec![Configuration::new(vec![Endpoint::new("ws://a")]).unwrap()];
        let err =
            select_configuration(configs, Some(ConnectKey::from("missing"))).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid(_)));
    }

    #[test]
    fn rejects_blank_url() {
        let err = Configuration::new(vec![Endpoint::new("")]).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid(_)));
    }

    #[test]
    fn defaults_match_spec() {
        let config = Configuration::new(vec![Endpoint::new("ws://localhost:8188")]).unwrap();
        assert_eq!(config.retry_time_secs, DEFAULT_RETRY_TIME_SECS);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert!(!config.is_admin);
        assert_eq!(config.ka_interval_secs, DEFAULT_KA_INTERVAL_SECS);
    }
}
