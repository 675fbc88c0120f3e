//! Utility modules

pub mod heap;
