

use eth_rpc_network::{NetworkConfig, NetworkRegistry, RpcNetwork};

use dotenvy::dotenv;

use log::*;


//checks every configured endpoint against the chain it is supposed to serve
#[tokio::main]
async fn main() {
    env_logger::init();
    dotenv().ok();

    let network_config = match NetworkConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("could not load network config: {}", e);
            std::process::exit(1);
        }
    };

    let registry = match NetworkRegistry::new(&network_config) {
        Ok(registry) => registry,
        Err(e) => {
            error!("could not build network registry: {}", e);
            std::process::exit(1);
        }
    };

    let mut mismatched = false;

    for network in RpcNetwork::ALL {

        let client = registry.get_network(network);

        info!(
            "checking {} at {}",
            network.get_network_name(),
            client.get_endpoint_url()
        );

        match client.id().await {

            Ok(remote_chain_id) if remote_chain_id == network.get_chain_id() => {
                info!("{} ok (chain id {})", network.get_network_name(), remote_chain_id);
            }

            Ok(remote_chain_id) => {
                //the endpoint answers, but for the wrong chain
                error!(
                    "{} is misconfigured: endpoint serves chain id {} but {} was expected",
                    network.get_network_name(),
                    remote_chain_id,
                    network.get_chain_id()
                );
                mismatched = true;
            }

            Err(e) => {
                warn!("{} unreachable: {}", network.get_network_name(), e);
                mismatched = true;
            }

        }

    }

    if mismatched {
        std::process::exit(1);
    }

}
