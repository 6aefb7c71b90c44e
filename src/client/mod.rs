//! URL builder: host selection, path normalisation, query encoding, signing.

mod shard;
mod sign;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::escape;
use crate::params::Params;

pub use shard::ShardStrategy;

/// Builds image URLs against a fixed set of hosts.
///
/// The only state that changes after construction is the round-robin
/// counter used by [`ShardStrategy::Cycle`]. It is atomic, so a `Client` can
/// be shared across threads (e.g. behind an `Arc`) and every caller still
/// gets hosts in strict rotation.
pub struct Client {
    hosts: Vec<String>,
    token: Option<String>,
    secure: bool,
    shard_strategy: ShardStrategy,
    cycle_index: AtomicUsize,
}

impl Client {
    /// Client over `hosts` with HTTPS, no signing, and cycle sharding.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();
        for configured in hosts.iter().filter(|h| escape::is_fully_qualified(h)) {
            tracing::warn!(configured = %configured, "host configured with a scheme; it will be stripped");
        }
        Self {
            hosts,
            token: None,
            secure: true,
            shard_strategy: ShardStrategy::default(),
            cycle_index: AtomicUsize::new(0),
        }
    }

    /// Single-host client that signs every URL with `token`. HTTPS enabled.
    pub fn with_token(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new([host.into()]).token(token)
    }

    /// Build a client from loaded configuration.
    ///
    /// A missing strategy resolves to [`ShardStrategy::Cycle`]; an unknown one
    /// fails with [`Error::UnsupportedStrategy`].
    pub fn from_config(cfg: &ClientConfig) -> Result<Self> {
        let strategy = match cfg.shard_strategy.as_deref() {
            Some(name) => name.parse()?,
            None => ShardStrategy::default(),
        };
        let mut client = Self::new(cfg.hosts.iter().cloned())
            .secure(cfg.secure)
            .with_shard_strategy(strategy);
        if let Some(token) = &cfg.token {
            client = client.token(token.clone());
        }
        tracing::debug!(
            hosts = client.hosts.len(),
            secure = client.secure,
            strategy = %client.shard_strategy,
            signed = client.token.is_some(),
            "client built from config"
        );
        Ok(client)
    }

    /// Set the signing token. An empty token disables signing.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// Choose `https` (true) or `http` (false).
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Choose how paths are spread across hosts.
    pub fn with_shard_strategy(mut self, strategy: ShardStrategy) -> Self {
        self.shard_strategy = strategy;
        self
    }

    /// The resolved sharding strategy.
    pub fn shard_strategy(&self) -> ShardStrategy {
        self.shard_strategy
    }

    /// Whether URLs use `https`.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Hosts as configured, in rotation order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// `"https"` if secure, else `"http"`.
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Configured host at `index`, as given (scheme not stripped).
    pub fn host_at(&self, index: usize) -> Result<&str> {
        if self.hosts.is_empty() {
            return Err(Error::NoHostsConfigured);
        }
        self.hosts
            .get(index)
            .map(String::as_str)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.hosts.len(),
            })
    }

    /// Pick the host for `path` and strip any `http(s)://` it was configured with.
    ///
    /// Under [`ShardStrategy::Cycle`] every call advances the rotation, so
    /// repeated calls with the same path return successive hosts.
    pub fn host(&self, path: &str) -> Result<String> {
        let len = self.hosts.len();
        if len == 0 {
            return Err(Error::NoHostsConfigured);
        }
        let index = match self.shard_strategy {
            ShardStrategy::Crc => shard::crc_index(path, len),
            ShardStrategy::Cycle => shard::next_cycle_index(&self.cycle_index, len),
        };
        let host = escape::strip_scheme(self.host_at(index)?);
        tracing::trace!(path, index, host, strategy = %self.shard_strategy, "selected host");
        Ok(host.to_string())
    }

    /// Signature for `path` with no parameters. Empty when no token is set.
    pub fn signature_for_path(&self, path: &str) -> String {
        self.signature_for_path_and_params(path, &Params::new())
    }

    /// `s=<hex>` over `token + path [+ "?" + query]`. Empty when no token is set.
    pub fn signature_for_path_and_params(&self, path: &str, params: &Params) -> String {
        self.signature_for_query(path, &params.canonical_query())
    }

    fn signature_for_query(&self, path: &str, query: &str) -> String {
        match &self.token {
            Some(token) => sign::signature(token, path, query),
            None => String::new(),
        }
    }

    /// Full URL to the image with no parameters.
    pub fn path(&self, img_path: &str) -> Result<String> {
        self.path_with_params(img_path, &Params::new())
    }

    /// Full URL to the image with `params`, signed when a token is set.
    ///
    /// A fully-qualified `img_path` (`http://...`) is escaped into one opaque
    /// segment. The signature is always the last query parameter, after the
    /// sorted user parameters.
    pub fn path_with_params(&self, img_path: &str, params: &Params) -> Result<String> {
        let host = self.host(img_path)?;

        let mut path = if escape::is_fully_qualified(img_path) {
            escape::cgi_escape(img_path)
        } else {
            img_path.to_string()
        };
        if !path.starts_with('/') {
            path.insert(0, '/');
        }

        let mut query = params.canonical_query();
        let signature = self.signature_for_query(&path, &query);
        if !signature.is_empty() {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&signature);
        }

        let mut built = format!("{}://{}{}", self.scheme(), host, path);
        if !query.is_empty() {
            built.push('?');
            built.push_str(&query);
        }
        tracing::debug!(img_path, params = params.len(), "built image url");
        Ok(built)
    }

    /// Like [`Client::path`], parsed into a [`Url`].
    pub fn url(&self, img_path: &str) -> Result<Url> {
        self.url_with_params(img_path, &Params::new())
    }

    /// Like [`Client::path_with_params`], parsed into a [`Url`].
    ///
    /// Fails with [`Error::UrlNormalized`] if parsing would change the string,
    /// since the signature only covers the exact built form.
    pub fn url_with_params(&self, img_path: &str, params: &Params) -> Result<Url> {
        let built = self.path_with_params(img_path, params)?;
        let parsed = match Url::parse(&built) {
            Ok(parsed) => parsed,
            Err(source) => return Err(Error::InvalidUrl { url: built, source }),
        };
        if parsed.as_str() != built {
            return Err(Error::UrlNormalized {
                built,
                parsed: parsed.into(),
            });
        }
        Ok(parsed)
    }
}

impl Clone for Client {
    fn clone(&self) -> Self {
        Self {
            hosts: self.hosts.clone(),
            token: self.token.clone(),
            secure: self.secure,
            shard_strategy: self.shard_strategy,
            cycle_index: AtomicUsize::new(self.cycle_index.load(Ordering::Acquire)),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("hosts", &self.hosts)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("secure", &self.secure)
            .field("shard_strategy", &self.shard_strategy)
            .field("cycle_index", &self.cycle_index.load(Ordering::Relaxed))
            .finish()
    }
}
