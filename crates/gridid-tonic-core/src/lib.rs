#![doc = include_str!("../README.md")]

mod common;
mod connection;

pub use common::*;
pub use connection::*;
// Public re-export so downstream crates can reach the core types via
// `gridid_tonic_core::gridid`
pub use gridid;

/// Generated protobuf messages and the `Directory` client/server stubs.
pub mod proto {
    tonic::include_proto!("gridid");
}
