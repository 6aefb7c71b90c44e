//! MD5 URL signatures.

/// Computes `s=<hex md5>` over `token + path`, plus `"?" + query` when the
/// query is non-empty.
pub(super) fn signature(token: &str, path: &str, query: &str) -> String {
    let mut ctx = md5::Context::new();
    ctx.consume(token.as_bytes());
    ctx.consume(path.as_bytes());
    if !query.is_empty() {
        ctx.consume(b"?");
        ctx.consume(query.as_bytes());
    }
    let digest = ctx.compute();
    format!("s={}", hex::encode(digest.0))
}
