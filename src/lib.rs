//! NWS weather forecasts exposed as MCP tools over stdio or streamable HTTP.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
