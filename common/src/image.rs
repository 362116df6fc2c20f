//! Container image reference parsing.
//!
//! A reference looks like `registry:port/path/name:tag@sha256:digest`. Only
//! the final path segment matters for display: the registry host and any
//! intermediate path are dropped, and the digest never takes part.

/// Tag reported when an image reference carries no explicit tag.
pub const DEFAULT_TAG: &str = "latest";

fn without_digest(image: &str) -> &str {
    match image.split_once('@') {
        Some((name, _digest)) => name,
        None => image,
    }
}

/// Final path segment of an image reference, digest removed.
///
/// The tag, if any, stays attached: `registry.io/team/api:1.4.2` yields
/// `api:1.4.2`.
pub fn short_name(image: &str) -> &str {
    let name = without_digest(image);
    name.rsplit_once('/').map_or(name, |(_, last)| last)
}

/// Tag of an image reference, or [`DEFAULT_TAG`] when none is present.
///
/// Only the final path segment is inspected, so a registry port
/// (`localhost:5000/api`) is never mistaken for a tag.
pub fn version(image: &str) -> &str {
    short_name(image)
        .rsplit_once(':')
        .map_or(DEFAULT_TAG, |(_, tag)| tag)
}
