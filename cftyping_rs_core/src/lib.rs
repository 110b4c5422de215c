//! # cftyping_core
//!
//! the shared vocabulary of a tabular data-analysis library, see [`typing`].

pub mod df;
pub mod error;
pub mod scalar;
pub mod toolkit;
pub mod typing;
