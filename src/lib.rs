//! Build, shard and sign URLs for an imgix-style image CDN.
//!
//! The main type is [`Client`]: it owns the list of hosts, the scheme, an
//! optional signing token and the sharding strategy, and composes URL strings
//! from an image path and optional [`Params`]. No I/O happens here; every
//! operation is a string computation that either succeeds or fails with a
//! configuration [`Error`].
//!
//! ```
//! use imgix_url::{Client, Params};
//!
//! let client = Client::new(["prod.imgix.net", "stag.imgix.net"]);
//! let params: Params = [("w", "200"), ("h", "400")].into_iter().collect();
//! assert_eq!(
//!     client.path_with_params("/1/users.jpg", &params).unwrap(),
//!     "https://prod.imgix.net/1/users.jpg?h=400&w=200"
//! );
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod escape;
pub mod logging;
pub mod params;

pub use client::{Client, ShardStrategy};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use params::Params;
