pub use alloy_primitives::{Address, U256};

pub mod config;
pub mod contract;
pub mod errors;
pub mod minter;
