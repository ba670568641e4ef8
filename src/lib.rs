//! MCP server exposing Hong Kong's current Air Quality Health Index.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
