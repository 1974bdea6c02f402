pub mod cholesky;
pub mod statistics;
