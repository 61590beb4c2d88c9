

use crate::NetworkError;

use url::Url;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcNetwork {

    Mainnet,
    Polygon,
    Arbitrum,
    Optimism

}

impl RpcNetwork {

    pub const ALL: [RpcNetwork; 4] = [
        Self::Mainnet,
        Self::Polygon,
        Self::Arbitrum,
        Self::Optimism,
    ];

    pub fn from_network_name(name: &str) -> Option<Self> {

        match name {

            "mainnet" => Some(Self::Mainnet),
            "polygon" => Some(Self::Polygon),
            "arbitrum" => Some(Self::Arbitrum),
            "optimism" => Some(Self::Optimism),

            _ => None

        }

    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {

        match chain_id {

            1 => Some(Self::Mainnet),
            137 => Some(Self::Polygon),
            42161 => Some(Self::Arbitrum),
            10 => Some(Self::Optimism),

            _ => None

        }

    }


    pub fn get_chain_id(&self) -> u64 {
        match self {

            Self::Mainnet => 1,
            Self::Polygon => 137,
            Self::Arbitrum => 42161,
            Self::Optimism => 10
        }

    }

    pub fn get_network_name(&self) -> &'static str {
        match self {

            Self::Mainnet => "mainnet",
            Self::Polygon => "polygon",
            Self::Arbitrum => "arbitrum",
            Self::Optimism => "optimism"
        }

    }

    pub fn get_rpc_url_env_var(&self) -> &'static str {
        match self {

            Self::Mainnet => "MAINNET_RPC_URL",
            Self::Polygon => "POLYGON_RPC_URL",
            Self::Arbitrum => "ARBITRUM_RPC_URL",
            Self::Optimism => "OPTIMISM_RPC_URL"
        }

    }

    /// Default endpoint for this chain. The alchemy-backed chains need the
    /// provider key spliced into the path; optimism uses the public host.
    pub fn default_endpoint_url(&self, alchemy_api_key: Option<&str>) -> Result<Url, NetworkError> {

        let alchemy_host = match self {

            Self::Mainnet => Some("eth-mainnet.g.alchemy.com"),
            Self::Polygon => Some("polygon-mainnet.g.alchemy.com"),
            Self::Arbitrum => Some("arb-mainnet.g.alchemy.com"),

            Self::Optimism => None

        };

        let raw = match alchemy_host {

            None => "https://mainnet.optimism.io".to_string(),

            Some(host) => {

                let Some(api_key) = alchemy_api_key else {
                    return Err(NetworkError::ConfigError(format!(
                        "no rpc url override and no alchemy api key for {}",
                        self.get_network_name()
                    )));
                };

                format!("https://{}/v2/{}", host, api_key)
            }

        };

        Ok(Url::parse(&raw)?)

    }

}
