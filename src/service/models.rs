//! Response shapes for the pool data service.
//!
//! Every on-chain quantity wider than 53 bits (liquidity, sqrtPriceX96, the
//! subgraph's BigInt/BigDecimal fields) is carried as a decimal string
//! end-to-end. Serde renames keep the wire format identical to the subgraph's
//! field names (`totalValueLockedUSD`, `poolDayData`, ...).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// On-chain pool state at read time. No freshness guarantee beyond the cache
/// TTL. `address` echoes the caller's casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub address: String,
    pub token0: String,
    pub token1: String,
    pub fee: u32,
    pub liquidity: String,
    #[serde(rename = "sqrtPrice")]
    pub sqrt_price: String,
    pub tick: i32,
}

/// Token half of an [`EnrichedPoolInfo`]. The symbol falls back to
/// `"Unknown"` when the subgraph has no record for the token id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: String,
    pub symbol: String,
    pub logo: String,
}

/// [`PoolSnapshot`] fused with subgraph token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPoolInfo {
    pub address: String,
    pub token0: TokenInfo,
    pub token1: TokenInfo,
    pub fee: u32,
    pub liquidity: String,
    #[serde(rename = "sqrtPrice")]
    pub sqrt_price: String,
    pub tick: i32,
}

/// One initialized tick of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// The subgraph serializes tick indices as BigInt strings; accept both
    /// string and number forms when decoding.
    #[serde(rename = "tickIdx", deserialize_with = "i32_from_string_or_number")]
    pub tick_idx: i32,
    #[serde(rename = "liquidityNet")]
    pub liquidity_net: String,
    #[serde(rename = "liquidityGross")]
    pub liquidity_gross: String,
    pub price0: String,
    pub price1: String,
}

/// Subgraph-computed aggregates for one pool, relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolAnalytics {
    pub token0_price: String,
    pub token1_price: String,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    /// Day-granular series, newest first, at most the requested day count.
    #[serde(rename = "poolDayData", default)]
    pub pool_day_data: Vec<PoolDayData>,
}

/// One day of a pool's aggregated activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolDayData {
    /// Unix day timestamp.
    pub date: i64,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "tvlUSD")]
    pub tvl_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub token0_price: String,
    pub token1_price: String,
}

/// Token reference inside search/top-pools results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRef {
    pub id: String,
    pub symbol: String,
}

/// Volume/fees slice of one day, used by the top-pools ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDayVolume {
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
}

/// Search and top-pools result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSummary {
    pub id: String,
    pub token0: TokenRef,
    pub token1: TokenRef,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "feeTier")]
    pub fee_tier: String,
    /// Only populated by the top-pools ranking; search rows omit it.
    #[serde(rename = "poolDayData", default, skip_serializing_if = "Vec::is_empty")]
    pub pool_day_data: Vec<PoolDayVolume>,
}

/// Subgraph token record used to enrich pool info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub id: String,
    pub symbol: String,
    #[serde(rename = "derivedETH", default)]
    pub derived_eth: Option<String>,
}

/// Placeholder payload for the metrics endpoint. No computation is defined
/// for it yet; the service returns this instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolMetrics {
    pub address: String,
    pub metrics: Option<Value>,
}

/// Placeholder payload for the range endpoint, same status as
/// [`PoolMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRange {
    pub address: String,
    pub range: Option<Value>,
}

fn i32_from_string_or_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse().map_err(serde::de::Error::custom),
        Value::Number(n) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom("tick index out of range")),
        other => Err(serde::de::Error::custom(format!(
            "expected tick index, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tick_index_decodes_from_bigint_string() {
        let tick: Tick = serde_json::from_value(json!({
            "tickIdx": "-887220",
            "liquidityNet": "1000",
            "liquidityGross": "1000",
            "price0": "1.0001",
            "price1": "0.9999"
        }))
        .unwrap();

        assert_eq!(tick.tick_idx, -887220);
    }

    #[test]
    fn snapshot_serializes_with_original_field_names() {
        let snapshot = PoolSnapshot {
            address: "0xPool".to_string(),
            token0: "0xA".to_string(),
            token1: "0xB".to_string(),
            fee: 3000,
            liquidity: "123456789012345678".to_string(),
            sqrt_price: "79228162514264337593543950336".to_string(),
            tick: 0,
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["sqrtPrice"], "79228162514264337593543950336");
        assert_eq!(value["liquidity"], "123456789012345678");
        assert_eq!(value["fee"], 3000);
    }

    #[test]
    fn analytics_decodes_subgraph_shape() {
        let analytics: PoolAnalytics = serde_json::from_value(json!({
            "token0Price": "1800.5",
            "token1Price": "0.00055",
            "totalValueLockedUSD": "250000000",
            "volumeUSD": "1000000",
            "feesUSD": "3000",
            "poolDayData": [
                {
                    "date": 1700006400,
                    "volumeUSD": "500000",
                    "tvlUSD": "250000000",
                    "feesUSD": "1500",
                    "token0Price": "1800.0",
                    "token1Price": "0.00055"
                }
            ]
        }))
        .unwrap();

        assert_eq!(analytics.pool_day_data.len(), 1);
        assert_eq!(analytics.pool_day_data[0].date, 1700006400);
        assert_eq!(analytics.total_value_locked_usd, "250000000");
    }

    #[test]
    fn search_row_without_day_data_decodes_and_omits_it() {
        let summary: PoolSummary = serde_json::from_value(json!({
            "id": "0xpool",
            "token0": { "id": "0xa", "symbol": "USDC" },
            "token1": { "id": "0xb", "symbol": "WETH" },
            "totalValueLockedUSD": "1000",
            "volumeUSD": "10",
            "feeTier": "500"
        }))
        .unwrap();

        assert!(summary.pool_day_data.is_empty());

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("poolDayData").is_none());
    }
}
