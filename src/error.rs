//! Error type for URL building.
//!
//! Every variant is a configuration problem detected at call time; nothing
//! here is transient, so callers should fix the client rather than retry.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Shard strategy name other than `crc` or `cycle`.
    #[error("shard strategy '{0}' is not supported")]
    UnsupportedStrategy(String),

    /// A host lookup was attempted on a client with no hosts.
    #[error("hosts must be provided")]
    NoHostsConfigured,

    /// A computed host index fell outside the configured host list.
    #[error("host index {index} is out of range for {len} configured hosts")]
    IndexOutOfRange { index: usize, len: usize },

    /// The composed URL string could not be parsed back into a `url::Url`.
    #[error("built URL '{url}' is invalid: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Parsing rewrote the built URL (dot segments, raw spaces, host case),
    /// so the parsed form no longer matches what was signed.
    #[error("built URL '{built}' was normalized to '{parsed}' when parsed")]
    UrlNormalized { built: String, parsed: String },
}
