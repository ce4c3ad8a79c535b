use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::{TtlCache, DEFAULT_TTL};
use crate::chain::{ChainReader, OnChainPoolState, PoolStateSource};
use crate::config::Settings;
use crate::error::ApiError;
use crate::subgraph::{queries, GraphTransport, SubgraphClient};
use crate::utils::{normalize_address, parse_address};

use super::models::{
    EnrichedPoolInfo, PoolAnalytics, PoolMetrics, PoolRange, PoolSnapshot, PoolSummary, Tick,
    TokenInfo, TokenMetadata,
};

/// Symbol reported when the subgraph has no record for a token id.
const UNKNOWN_SYMBOL: &str = "Unknown";

/// Indexer-side cap on ticks per pool, enforced again locally.
const MAX_TICKS: usize = 1000;

const DEFAULT_ANALYTICS_DAYS: u32 = 7;

const SECONDS_PER_DAY: i64 = 86_400;

const TOP_POOLS_KEY: &str = "top-pools";

fn token_logo_url(address: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/trustwallet/assets/master/blockchains/ethereum/assets/{address}/logo.png"
    )
}

/// Orchestrates the chain reader, the subgraph client and the cache to answer
/// pool queries.
///
/// Every accessor computes a deterministic cache key first; on a hit the
/// stored value is returned unchanged, on a miss the sources are queried, the
/// result reshaped and stored. Search intentionally bypasses the cache: its
/// key-space is unbounded free text with low reuse.
pub struct PoolService<R = ChainReader, G = SubgraphClient>
where
    R: PoolStateSource,
    G: GraphTransport,
{
    chain: R,
    subgraph: G,
    pools: TtlCache<PoolSnapshot>,
    enhanced: TtlCache<EnrichedPoolInfo>,
    ticks: TtlCache<Arc<Vec<Tick>>>,
    analytics: TtlCache<Option<PoolAnalytics>>,
    top_pools: TtlCache<Arc<Vec<PoolSummary>>>,
}

impl PoolService {
    pub fn new(settings: &Settings) -> Self {
        Self::with_sources(
            ChainReader::new(settings.rpc_url.clone()),
            SubgraphClient::new(settings.graph_api_key.clone(), settings.subgraph_id.clone()),
        )
    }
}

impl<R, G> PoolService<R, G>
where
    R: PoolStateSource,
    G: GraphTransport,
{
    pub fn with_sources(chain: R, subgraph: G) -> Self {
        Self::with_ttl(chain, subgraph, DEFAULT_TTL)
    }

    pub fn with_ttl(chain: R, subgraph: G, ttl: Duration) -> Self {
        Self {
            chain,
            subgraph,
            pools: TtlCache::new(ttl),
            enhanced: TtlCache::new(ttl),
            ticks: TtlCache::new(ttl),
            analytics: TtlCache::new(ttl),
            top_pools: TtlCache::new(ttl),
        }
    }

    /// On-chain snapshot of one pool.
    pub async fn pool_info(&self, address: &str) -> Result<PoolSnapshot, ApiError> {
        let pool = parse_address(address)?;
        let key = format!("pool-{}", normalize_address(address));

        if let Some(mut hit) = self.pools.get(&key).await {
            // The cache is keyed on the lowercased address; the echoed
            // address always carries the current caller's casing
            hit.address = address.to_string();
            return Ok(hit);
        }

        let state = self.chain.pool_state(pool).await?;
        let snapshot = snapshot_from_state(address, &state);

        self.pools.insert(key, snapshot.clone()).await;

        Ok(snapshot)
    }

    /// On-chain snapshot fused with subgraph token metadata.
    ///
    /// A token missing from the subgraph degrades to the `"Unknown"` symbol
    /// without failing the call; a failure of either source fails the whole
    /// call with no partial result.
    pub async fn enhanced_pool_info(&self, address: &str) -> Result<EnrichedPoolInfo, ApiError> {
        let pool = parse_address(address)?;
        let key = format!("enhanced-pool-{}", normalize_address(address));

        if let Some(mut hit) = self.enhanced.get(&key).await {
            hit.address = address.to_string();
            return Ok(hit);
        }

        let state = self.chain.pool_state(pool).await?;
        let token0 = state.token0.to_string();
        let token1 = state.token1.to_string();

        let data = self
            .subgraph
            .query(
                queries::TOKEN_METADATA,
                json!({ "tokenIds": [token0.to_lowercase(), token1.to_lowercase()] }),
            )
            .await?;
        let tokens: Option<Vec<TokenMetadata>> = decode(&data, "tokens")?;
        let by_id: HashMap<String, TokenMetadata> = tokens
            .unwrap_or_default()
            .into_iter()
            .map(|token| (token.id.to_lowercase(), token))
            .collect();

        let info = EnrichedPoolInfo {
            address: address.to_string(),
            token0: token_info(&token0, &by_id),
            token1: token_info(&token1, &by_id),
            fee: state.fee,
            liquidity: state.liquidity.to_string(),
            sqrt_price: state.sqrt_price_x96.to_string(),
            tick: state.tick,
        };

        self.enhanced.insert(key, info.clone()).await;

        Ok(info)
    }

    /// Tick distribution of one pool, ascending by tick index, at most 1000
    /// entries. Unknown pool yields an empty list.
    pub async fn pool_ticks(&self, address: &str) -> Result<Arc<Vec<Tick>>, ApiError> {
        parse_address(address)?;
        let id = normalize_address(address);
        let key = format!("ticks-{id}");

        if let Some(hit) = self.ticks.get(&key).await {
            return Ok(hit);
        }

        #[derive(Deserialize)]
        struct PoolTicks {
            #[serde(default)]
            ticks: Vec<Tick>,
        }

        let data = self
            .subgraph
            .query(queries::POOL_TICKS, json!({ "poolAddress": id }))
            .await?;
        let pool: Option<PoolTicks> = decode(&data, "pool")?;

        let mut ticks = pool.map(|p| p.ticks).unwrap_or_default();
        // The query already orders and caps; enforce both locally so a
        // misbehaving indexer cannot break the contract
        ticks.sort_by_key(|t| t.tick_idx);
        ticks.truncate(MAX_TICKS);
        let ticks = Arc::new(ticks);

        self.ticks.insert(key, ticks.clone()).await;

        Ok(ticks)
    }

    /// Rolling aggregates for one pool over the last `days` days (default 7).
    /// `None` when the subgraph has no record of the pool.
    pub async fn pool_analytics(
        &self,
        address: &str,
        days: Option<u32>,
    ) -> Result<Option<PoolAnalytics>, ApiError> {
        parse_address(address)?;
        let days = days.unwrap_or(DEFAULT_ANALYTICS_DAYS);
        let id = normalize_address(address);
        let key = format!("analytics-{id}-{days}");

        if let Some(hit) = self.analytics.get(&key).await {
            return Ok(hit);
        }

        let start_time = Utc::now().timestamp() - i64::from(days) * SECONDS_PER_DAY;
        let data = self
            .subgraph
            .query(
                queries::POOL_ANALYTICS,
                json!({ "poolAddress": id, "startTime": start_time, "days": days }),
            )
            .await?;
        let analytics: Option<PoolAnalytics> = decode(&data, "pool")?;

        self.analytics.insert(key, analytics.clone()).await;

        Ok(analytics)
    }

    /// Top 100 pools by TVL, each with up to 30 days of day-data after a
    /// 24h-ago cutoff.
    pub async fn top_pools(&self) -> Result<Arc<Vec<PoolSummary>>, ApiError> {
        if let Some(hit) = self.top_pools.get(TOP_POOLS_KEY).await {
            return Ok(hit);
        }

        let start_time = Utc::now().timestamp() - SECONDS_PER_DAY;
        let data = self
            .subgraph
            .query(queries::TOP_POOLS, json!({ "startTime": start_time }))
            .await?;
        let pools: Option<Vec<PoolSummary>> = decode(&data, "pools")?;
        let pools = Arc::new(pools.unwrap_or_default());

        self.top_pools.insert(TOP_POOLS_KEY, pools.clone()).await;

        Ok(pools)
    }

    /// Free-text pool search by token symbol. Never cached.
    pub async fn search_pools(&self, text: &str) -> Result<Vec<PoolSummary>, ApiError> {
        let data = self
            .subgraph
            .query(queries::SEARCH_POOLS, json!({ "text": text }))
            .await?;
        let pools: Option<Vec<PoolSummary>> = decode(&data, "pools")?;

        Ok(pools.unwrap_or_default())
    }

    /// Reserved extension point; returns a documented placeholder until a
    /// metrics computation is defined.
    pub async fn pool_metrics(&self, address: &str) -> Result<PoolMetrics, ApiError> {
        parse_address(address)?;

        Ok(PoolMetrics {
            address: address.to_string(),
            metrics: None,
        })
    }

    /// Reserved extension point, same status as [`Self::pool_metrics`].
    pub async fn pool_range(&self, address: &str) -> Result<PoolRange, ApiError> {
        parse_address(address)?;

        Ok(PoolRange {
            address: address.to_string(),
            range: None,
        })
    }
}

fn snapshot_from_state(address: &str, state: &OnChainPoolState) -> PoolSnapshot {
    PoolSnapshot {
        address: address.to_string(),
        token0: state.token0.to_string(),
        token1: state.token1.to_string(),
        fee: state.fee,
        liquidity: state.liquidity.to_string(),
        sqrt_price: state.sqrt_price_x96.to_string(),
        tick: state.tick,
    }
}

fn token_info(address: &str, tokens: &HashMap<String, TokenMetadata>) -> TokenInfo {
    let symbol = tokens
        .get(&address.to_lowercase())
        .map(|token| token.symbol.clone())
        .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string());

    TokenInfo {
        address: address.to_string(),
        symbol,
        logo: token_logo_url(address),
    }
}

/// Typed decode of one field of a subgraph `data` payload. A shape mismatch
/// fails fast instead of propagating nulls downstream.
fn decode<T: DeserializeOwned>(data: &Value, field: &str) -> Result<T, ApiError> {
    let value = data.get(field).cloned().unwrap_or(Value::Null);

    serde_json::from_value(value).map_err(|e| ApiError::Transport {
        status: None,
        message: format!("unexpected subgraph response shape for `{field}`: {e}"),
    })
}
