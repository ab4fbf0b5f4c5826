//! Statistics core: fit-quality metrics and the least-squares line.

pub mod metrics;
pub mod ols;

pub use metrics::{compute, sse};
pub use ols::solve;
