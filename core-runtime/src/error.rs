//! Startup errors: bad settings, or a bridge that could not be wired.

use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A setting is missing or fails validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No implementation was injected for a bridge and no default is compiled in.
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    /// A default bridge implementation failed to start.
    #[error("Failed to initialize {capability}: {source}")]
    Bridge {
        capability: &'static str,
        #[source]
        source: BridgeError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
