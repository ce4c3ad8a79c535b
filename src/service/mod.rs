pub mod models;
pub mod pool_service;

pub use models::{
    EnrichedPoolInfo, PoolAnalytics, PoolDayData, PoolDayVolume, PoolMetrics, PoolRange,
    PoolSnapshot, PoolSummary, Tick, TokenInfo, TokenMetadata, TokenRef,
};
pub use pool_service::PoolService;
