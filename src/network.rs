

use crate::params::EthParameter;
use crate::rpc_network::RpcNetwork;
use crate::{NetworkConfig, NetworkError};

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use log::*;


#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a [EthParameter],
}

#[derive(Deserialize)]
struct JsonRpcResponse {

    #[serde(default)]
    id: Option<u64>,

    #[serde(default)]
    result: Option<Box<RawValue>>,

    #[serde(default)]
    error: Option<JsonRpcErrorBody>,

}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorBody {
    code: i64,
    message: String,
}


/// A json-rpc client bound to one chain endpoint for its whole lifetime.
/// Holds no per-call state beyond the request id counter, so one instance
/// can serve any number of concurrent callers.
pub struct EthereumNetwork {

    network: RpcNetwork,
    endpoint_url: Url,

    http_client: reqwest::Client,
    request_timeout: Duration,

    next_request_id: AtomicU64,

}


impl EthereumNetwork {

    pub fn new(
        network: RpcNetwork,
        endpoint_url: Url,
        request_timeout: Duration,
    ) -> Result<Self, NetworkError> {

        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| NetworkError::ConfigError(format!("could not build http client: {}", e)))?;

        Ok(Self {
            network,
            endpoint_url,
            http_client,
            request_timeout,
            next_request_id: AtomicU64::new(1),
        })

    }

    pub fn get_network(&self) -> RpcNetwork {
        self.network
    }

    pub fn get_endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }


    /// Asks the remote node which chain it actually serves, decoding the
    /// hex chain id string from eth_chainId.
    ///
    /// Compare against [RpcNetwork::get_chain_id] to catch an endpoint that
    /// is configured for the wrong chain before trusting it with anything.
    pub async fn id(&self) -> Result<u64, NetworkError> {

        let raw_result = self.call("eth_chainId", &[]).await?;

        let hex_string: String = serde_json::from_str(raw_result.get())
            .map_err(|_e| NetworkError::DecodingError(format!(
                "chain id result is not a json string: {}",
                raw_result.get()
            )))?;

        let hex_digits = hex_string.strip_prefix("0x")
            .ok_or_else(|| NetworkError::DecodingError(format!(
                "chain id is missing the 0x prefix: {}",
                hex_string
            )))?;

        u64::from_str_radix(hex_digits, 16)
            .map_err(|_e| NetworkError::DecodingError(format!(
                "chain id is not valid hex: {}",
                hex_string
            )))

    }


    /// Issues one json-rpc 2.0 call and hands back the raw `result` bytes,
    /// undecoded. The caller knows the shape its method returns; this layer
    /// stays method-agnostic.
    pub async fn call(
        &self,
        method: &str,
        params: &[EthParameter],
    ) -> Result<Box<RawValue>, NetworkError> {

        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst);

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: request_id,
            method,
            params,
        };

        debug!("rpc call {} on {}", method, self.network.get_network_name());

        let response = self.http_client
            .post(self.endpoint_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();

        let body = response.bytes().await
            .map_err(|e| self.classify_transport_error(e))?;

        if !status.is_success() {
            return Err(NetworkError::HttpStatusError {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let envelope: JsonRpcResponse = serde_json::from_slice(&body)
            .map_err(|e| NetworkError::MalformedResponse(format!("invalid json-rpc envelope: {}", e)))?;

        //a remote error is surfaced verbatim, never flattened into a generic failure
        if let Some(remote_error) = envelope.error {

            warn!(
                "rpc error from {}: {} {}",
                self.network.get_network_name(), remote_error.code, remote_error.message
            );

            return Err(NetworkError::RemoteRpcError {
                code: remote_error.code,
                message: remote_error.message,
            });
        }

        if envelope.id != Some(request_id) {
            return Err(NetworkError::MalformedResponse(format!(
                "response id {:?} does not match request id {}",
                envelope.id, request_id
            )));
        }

        envelope.result.ok_or_else(|| {
            NetworkError::MalformedResponse("response carries neither result nor error".to_string())
        })

    }


    fn classify_transport_error(&self, error: reqwest::Error) -> NetworkError {

        if error.is_timeout() {
            return NetworkError::TimeoutError(self.request_timeout);
        }

        NetworkError::TransportError(error)

    }

}


/// The one shared client per supported chain, built once at process start.
/// One field per chain keeps the lookup total over the enum with no runtime
/// error path.
pub struct NetworkRegistry {

    mainnet: Arc<EthereumNetwork>,
    polygon: Arc<EthereumNetwork>,
    arbitrum: Arc<EthereumNetwork>,
    optimism: Arc<EthereumNetwork>,

}


impl NetworkRegistry {

    /// Builds every client up front. Performs no network i/o.
    pub fn new(config: &NetworkConfig) -> Result<Self, NetworkError> {

        Ok(Self {
            mainnet: Arc::new(build_network(RpcNetwork::Mainnet, config)?),
            polygon: Arc::new(build_network(RpcNetwork::Polygon, config)?),
            arbitrum: Arc::new(build_network(RpcNetwork::Arbitrum, config)?),
            optimism: Arc::new(build_network(RpcNetwork::Optimism, config)?),
        })

    }

    pub fn get_network(&self, network: RpcNetwork) -> &Arc<EthereumNetwork> {

        match network {

            RpcNetwork::Mainnet => &self.mainnet,
            RpcNetwork::Polygon => &self.polygon,
            RpcNetwork::Arbitrum => &self.arbitrum,
            RpcNetwork::Optimism => &self.optimism

        }

    }

}


fn build_network(
    network: RpcNetwork,
    config: &NetworkConfig,
) -> Result<EthereumNetwork, NetworkError> {

    let endpoint_url = match config.rpc_url_overrides.get(&network) {
        Some(override_url) => Url::parse(override_url)?,
        None => network.default_endpoint_url(config.alchemy_api_key.as_deref())?,
    };

    EthereumNetwork::new(network, endpoint_url, config.request_timeout)

}


#[cfg(test)]
mod tests {

    use super::*;

    fn test_config() -> NetworkConfig {
        NetworkConfig {
            alchemy_api_key: Some("testkey".to_string()),
            rpc_url_overrides: Default::default(),
            request_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn registry_endpoints_match_the_configured_urls() {

        let registry = NetworkRegistry::new(&test_config()).unwrap();

        let expected = [
            (RpcNetwork::Mainnet, "https://eth-mainnet.g.alchemy.com/v2/testkey"),
            (RpcNetwork::Polygon, "https://polygon-mainnet.g.alchemy.com/v2/testkey"),
            (RpcNetwork::Arbitrum, "https://arb-mainnet.g.alchemy.com/v2/testkey"),
            (RpcNetwork::Optimism, "https://mainnet.optimism.io/"),
        ];

        for (network, expected_url) in expected {
            let client = registry.get_network(network);
            assert_eq!(client.get_network(), network);
            assert_eq!(client.get_endpoint_url().as_str(), expected_url);
        }

    }

    #[test]
    fn registry_hands_out_the_same_shared_client() {

        let registry = NetworkRegistry::new(&test_config()).unwrap();

        let first = Arc::clone(registry.get_network(RpcNetwork::Polygon));
        let second = Arc::clone(registry.get_network(RpcNetwork::Polygon));

        assert!(Arc::ptr_eq(&first, &second));

    }

    #[test]
    fn url_override_takes_precedence_over_the_default_endpoint() {

        let mut config = test_config();
        config.rpc_url_overrides.insert(
            RpcNetwork::Mainnet,
            "http://localhost:8545".to_string(),
        );

        let registry = NetworkRegistry::new(&config).unwrap();

        assert_eq!(
            registry.get_network(RpcNetwork::Mainnet).get_endpoint_url().as_str(),
            "http://localhost:8545/"
        );

    }

    #[test]
    fn missing_provider_key_fails_registry_construction() {

        let mut config = test_config();
        config.alchemy_api_key = None;

        let result = NetworkRegistry::new(&config);
        assert!(matches!(result, Err(NetworkError::ConfigError(_))));

    }

}
