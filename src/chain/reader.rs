use std::sync::Arc;

use alloy::primitives::{aliases::U160, Address};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use log::error;
use tokio::sync::Mutex;
use url::Url;

use crate::abis::IUniswapV3Pool;
use crate::error::ApiError;

/// Raw contract state for a single pool, read in one concurrent batch.
///
/// Liquidity and sqrtPriceX96 are wider than 53 bits, so downstream
/// consumers serialize them as decimal strings and never as floats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainPoolState {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub liquidity: u128,
    pub sqrt_price_x96: U160,
    pub tick: i32,
}

/// Seam over on-chain pool reads, stubbed in service tests.
#[async_trait]
pub trait PoolStateSource: Send + Sync {
    async fn pool_state(&self, pool: Address) -> Result<OnChainPoolState, ApiError>;
}

/// Lifecycle of the single underlying RPC connection.
///
/// `Failed` is set by the asynchronous connectivity probe; the next call
/// treats it like `Disconnected` and re-initializes instead of reusing a
/// known-bad handle. Connection setup itself is synchronous, so no separate
/// "connecting" state is observable.
enum ConnectionState {
    Disconnected,
    Ready(DynProvider),
    Failed,
}

/// Connection state tagged with a generation so a stale probe from an old
/// handle cannot invalidate a newer one.
struct ConnectionSlot {
    generation: u64,
    state: ConnectionState,
}

/// Maintains exactly one lazily-created JSON-RPC connection and exposes the
/// batched pool state read.
pub struct ChainReader {
    rpc_url: Option<String>,
    conn: Arc<Mutex<ConnectionSlot>>,
}

impl ChainReader {
    pub fn new(rpc_url: Option<String>) -> Self {
        Self {
            rpc_url,
            conn: Arc::new(Mutex::new(ConnectionSlot {
                generation: 0,
                state: ConnectionState::Disconnected,
            })),
        }
    }

    /// Connect-or-reuse. Returns the existing provider when ready, otherwise
    /// builds one and spawns a connectivity probe that invalidates the handle
    /// on failure.
    async fn provider(&self) -> Result<DynProvider, ApiError> {
        let mut slot = self.conn.lock().await;

        if let ConnectionState::Ready(provider) = &slot.state {
            return Ok(provider.clone());
        }

        let rpc_url = self.rpc_url.as_deref().ok_or_else(|| {
            ApiError::Configuration("RPC_URL not found in environment variables".to_string())
        })?;
        let url = Url::parse(rpc_url)
            .map_err(|e| ApiError::Configuration(format!("invalid RPC URL: {e}")))?;

        let provider = DynProvider::new(ProviderBuilder::new().connect_http(url));

        slot.generation += 1;
        let generation = slot.generation;

        // Probe readiness without blocking the first caller. A failure after
        // initialization invalidates the handle so the next use reconnects;
        // the generation check keeps a stale probe from touching a handle
        // built after it was spawned.
        let probe = provider.clone();
        let shared = self.conn.clone();
        tokio::spawn(async move {
            if let Err(e) = probe.get_chain_id().await {
                error!("RPC connectivity probe failed: {e}");
                let mut slot = shared.lock().await;
                if slot.generation == generation {
                    slot.state = ConnectionState::Failed;
                }
            }
        });

        slot.state = ConnectionState::Ready(provider.clone());

        Ok(provider)
    }
}

#[async_trait]
impl PoolStateSource for ChainReader {
    /// Read token0/token1/fee/liquidity/slot0 for one pool.
    ///
    /// The five calls are independent and issued concurrently; if any of them
    /// fails the aggregate fails and no partial state is returned.
    async fn pool_state(&self, pool: Address) -> Result<OnChainPoolState, ApiError> {
        let provider = self.provider().await?;
        let contract = IUniswapV3Pool::new(pool, &provider);

        // The builders must outlive the join, so bind them before fanning out
        let token0_call = contract.token0();
        let token1_call = contract.token1();
        let fee_call = contract.fee();
        let liquidity_call = contract.liquidity();
        let slot0_call = contract.slot0();

        let (token0, token1, fee, liquidity, slot0) = tokio::try_join!(
            token0_call.call(),
            token1_call.call(),
            fee_call.call(),
            liquidity_call.call(),
            slot0_call.call(),
        )
        .map_err(|e| {
            error!("pool state read failed for {pool}: {e}");
            ApiError::Connectivity(format!("pool state read failed for {pool}: {e}"))
        })?;

        Ok(OnChainPoolState {
            token0,
            token1,
            fee: fee.to::<u32>(),
            liquidity,
            sqrt_price_x96: slot0.sqrtPriceX96,
            tick: slot0.tick.as_i32(),
        })
    }
}
