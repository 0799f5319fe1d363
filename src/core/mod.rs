//! Core contracts: the fetcher seam, result encoding and protocol error mapping.

pub mod content;
pub mod error;
pub mod tool;
