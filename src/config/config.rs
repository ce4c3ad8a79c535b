use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root application configuration.
///
/// Loaded from an optional `config.yaml` plus environment variable overrides
/// (`RPC_URL`, `GRAPH_API_KEY`, `SUBGRAPH_ID`, `PORT`).
///
/// The RPC URL and Graph API key are deliberately optional here: a missing
/// value is a configuration error raised the first time the corresponding
/// client is used, so subgraph-only endpoints keep working without an RPC
/// endpoint and vice versa.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Ethereum JSON-RPC endpoint for on-chain pool reads.
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// The Graph gateway API key for subgraph queries.
    #[serde(default)]
    pub graph_api_key: Option<String>,
    /// Subgraph deployment id queried through the gateway.
    #[serde(default = "default_subgraph_id")]
    pub subgraph_id: String,
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Uniswap V3 mainnet subgraph.
fn default_subgraph_id() -> String {
    "5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::default())
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: None,
            graph_api_key: None,
            subgraph_id: default_subgraph_id(),
            port: default_port(),
        }
    }
}
