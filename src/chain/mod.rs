pub mod reader;

pub use reader::{ChainReader, OnChainPoolState, PoolStateSource};
