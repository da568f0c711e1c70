#![doc = include_str!("../README.md")]

mod client;
mod config;
mod connection;
mod envelope;
mod error;
mod id;

pub use crate::client::*;
pub use crate::config::*;
pub use crate::connection::*;
pub use crate::envelope::*;
pub use crate::error::*;
pub use crate::id::*;
