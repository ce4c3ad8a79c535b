//! Address helpers shared by the chain and subgraph paths.

mod address;

pub use address::{normalize_address, parse_address};
