pub mod abis;
pub mod api;
pub mod cache;
pub mod chain;
pub mod config;
pub mod error;
pub mod service;
pub mod subgraph;
pub mod utils;

pub use chain::ChainReader;
pub use config::Settings;
pub use error::ApiError;
pub use service::PoolService;
pub use subgraph::SubgraphClient;
