//! Monte Carlo forecasting of weighted multi-asset portfolios.
//!
//! Historical closes are turned into daily returns, each asset gets a normal
//! return distribution, and geometric random walks starting at the last
//! close are combined into portfolio growth factors and summarized.
pub mod analysis;
pub mod data;
pub mod math;
pub mod models;
pub mod prelude;
pub mod simulation;
pub mod utils;
