#![warn(missing_debug_implementations)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::map_unwrap_or)]
#![deny(clippy::semicolon_if_nothing_returned)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod cache;
pub mod caching;
pub mod config;
pub mod credential;
pub mod error;
pub mod prelude;

pub use crate::prelude::*;
