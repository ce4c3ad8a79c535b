use std::time::Duration;

use moka::future::Cache;

/// Default entry lifetime for memoized RPC and subgraph responses.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Expiring key-value store used to memoize upstream responses.
///
/// Entries expire a fixed interval after insertion and behave as absent on the
/// next lookup; there is no explicit invalidation. Safe for concurrent
/// `get`/`insert` from multiple in-flight requests.
#[derive(Clone)]
pub struct TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<String, V>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        // Bounded by pool count in practice; the capacity is a safety net
        let inner = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(ttl)
            .build();

        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.inner.insert(key.into(), value).await;
    }
}
