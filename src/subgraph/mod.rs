pub mod client;
pub mod queries;

pub use client::{GraphTransport, SubgraphClient};
