//! GraphQL documents issued against the Uniswap V3 subgraph.
//!
//! All inputs travel through GraphQL variables; nothing is spliced into the
//! document text.

/// First 1000 ticks of one pool, ascending by tick index (indexer-side cap).
pub const POOL_TICKS: &str = r#"
    query PoolTicks($poolAddress: String!) {
        pool(id: $poolAddress) {
            ticks(first: 1000, orderBy: tickIdx) {
                tickIdx
                liquidityNet
                liquidityGross
                price0
                price1
            }
        }
    }
"#;

/// Current aggregates plus a day-granular series for one pool.
pub const POOL_ANALYTICS: &str = r#"
    query PoolAnalytics($poolAddress: String!, $startTime: Int!, $days: Int!) {
        pool(id: $poolAddress) {
            token0Price
            token1Price
            totalValueLockedUSD
            volumeUSD
            feesUSD
            poolDayData(
                first: $days
                orderBy: date
                orderDirection: desc
                where: { date_gt: $startTime }
            ) {
                date
                volumeUSD
                tvlUSD
                feesUSD
                token0Price
                token1Price
            }
        }
    }
"#;

/// Top 100 pools by TVL, each with its recent day-data after the cutoff.
pub const TOP_POOLS: &str = r#"
    query TopPools($startTime: Int!) {
        pools(
            first: 100
            orderBy: totalValueLockedUSD
            orderDirection: desc
        ) {
            id
            token0 {
                id
                symbol
            }
            token1 {
                id
                symbol
            }
            totalValueLockedUSD
            volumeUSD
            feeTier
            poolDayData(
                first: 30
                orderBy: date
                orderDirection: desc
                where: { date_gt: $startTime }
            ) {
                volumeUSD
                feesUSD
            }
        }
    }
"#;

/// Case-insensitive substring match on either token symbol, top 20 by TVL.
pub const SEARCH_POOLS: &str = r#"
    query SearchPools($text: String!) {
        pools(
            where: {
                or: [
                    { token0_: { symbol_contains_nocase: $text } }
                    { token1_: { symbol_contains_nocase: $text } }
                ]
            }
            orderBy: totalValueLockedUSD
            orderDirection: desc
            first: 20
        ) {
            id
            token0 {
                id
                symbol
            }
            token1 {
                id
                symbol
            }
            totalValueLockedUSD
            volumeUSD
            feeTier
        }
    }
"#;

/// Symbol lookup for a set of token ids (lowercased addresses).
pub const TOKEN_METADATA: &str = r#"
    query TokenData($tokenIds: [String!]!) {
        tokens(where: { id_in: $tokenIds }) {
            id
            symbol
            derivedETH
        }
    }
"#;
