

use thiserror::Error;

use std::collections::HashMap;
use std::time::Duration;


pub mod network;

pub mod params;

pub mod rpc_network;


pub use network::{EthereumNetwork, NetworkRegistry};
pub use params::{BlockTag, EthParameter};
pub use rpc_network::RpcNetwork;

use log::*;


pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);


#[derive(Error, Debug)]
pub enum NetworkError {

    #[error("Error reaching the rpc endpoint: {0}")]
    TransportError(#[source] reqwest::Error),

    #[error("Rpc call timed out after {0:?}")]
    TimeoutError(Duration),

    #[error("Rpc endpoint returned http status {status}")]
    HttpStatusError { status: u16, body: String },

    #[error("Malformed rpc response: {0}")]
    MalformedResponse(String),

    #[error("Rpc error {code}: {message}")]
    RemoteRpcError { code: i64, message: String },

    #[error("Error decoding rpc result: {0}")]
    DecodingError(String),

    #[error("Error with parse: {0}")]
    ParseError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

}


//immutable
#[derive(Debug, Clone)]
pub struct NetworkConfig {

    pub alchemy_api_key: Option<String>,

    pub rpc_url_overrides: HashMap<RpcNetwork, String>,

    pub request_timeout: Duration,

}

impl Default for NetworkConfig {

    fn default() -> Self {
        Self {
            alchemy_api_key: None,
            rpc_url_overrides: HashMap::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT
        }

    }

}

impl NetworkConfig {

    /// Reads the provider key, per-chain url overrides and request timeout
    /// from the process environment.
    pub fn from_env() -> Result<Self, NetworkError> {

        let alchemy_api_key = std::env::var("ALCHEMY_API_KEY").ok();

        let mut rpc_url_overrides = HashMap::new();

        for network in RpcNetwork::ALL {

            if let Ok(override_url) = std::env::var(network.get_rpc_url_env_var()) {

                info!(
                    "using rpc url override for {} from {}",
                    network.get_network_name(),
                    network.get_rpc_url_env_var()
                );

                rpc_url_overrides.insert(network, override_url);
            }

        }

        let request_timeout = match std::env::var("RPC_TIMEOUT_MS") {

            Ok(raw_ms) => {
                let ms: u64 = raw_ms.parse().map_err(|_e| {
                    NetworkError::ConfigError(format!("RPC_TIMEOUT_MS is not an integer: {}", raw_ms))
                })?;
                Duration::from_millis(ms)
            }

            Err(_) => DEFAULT_REQUEST_TIMEOUT

        };

        Ok(Self {
            alchemy_api_key,
            rpc_url_overrides,
            request_timeout
        })

    }

}
