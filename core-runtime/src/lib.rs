//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the sync core and the
//! `folder-albums` binary:
//! - Configuration management (`CoreConfig` builder with validation)
//! - Logging and tracing infrastructure
//!
//! ## Overview
//!
//! Nothing in this crate talks to the network or the filesystem by itself;
//! it resolves settings and wires the bridge implementations the other
//! crates use.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};
