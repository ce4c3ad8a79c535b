pub mod v3;

pub use v3::IUniswapV3Pool;
