//! Asset origin discovery and container id synthesis.
//!
//! Variant modules are served from the same origin as the loader script.
//! The loader finds that origin from its own `src` (the current script), or
//! from any `<script src>` on the page that points at the loader file, and
//! otherwise falls back to the production origin.

use uuid::Uuid;

/// Origin used when the loader script's own origin cannot be discovered.
pub const PRODUCTION_ORIGIN: &str = "https://widgets.plaudit.app";

/// File name of the loader script, used to recognize it among page scripts.
pub const LOADER_SCRIPT_NAME: &str = "plaudit-widget.js";

/// Namespace for synthesized container ids.
const CONTAINER_NAMESPACE: Uuid = Uuid::from_u128(0x5c1e_7a0f_93d4_4b8e_a2f1_0e6d_c4b9_7731);

/// Prefix of synthesized container ids.
const CONTAINER_PREFIX: &str = "plaudit-widget-";

/// Returns the `scheme://host[:port]` part of an absolute `http(s)` URL.
///
/// # Examples
///
/// ```
/// use plaudit_config::origin::origin_of;
///
/// assert_eq!(
///     origin_of("https://cdn.example.com:8443/js/plaudit-widget.js?v=3"),
///     Some("https://cdn.example.com:8443"),
/// );
/// assert_eq!(origin_of("/relative/plaudit-widget.js"), None);
/// assert_eq!(origin_of("data:text/javascript,alert(1)"), None);
/// ```
#[must_use]
pub fn origin_of(url: &str) -> Option<&str> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if host_len == 0 {
        return None;
    }
    Some(&url[..url.len() - rest.len() + host_len])
}

/// Resolves the origin that variant modules are loaded from.
///
/// Tries the current script's `src`, then the first page script whose path
/// ends in [`LOADER_SCRIPT_NAME`], then [`PRODUCTION_ORIGIN`].
///
/// # Examples
///
/// ```
/// use plaudit_config::origin::{PRODUCTION_ORIGIN, resolve_asset_origin};
///
/// let page = ["https://cdn.other.com/jquery.js", "https://staging.plaudit.app/plaudit-widget.js"];
/// assert_eq!(resolve_asset_origin(None, &page), "https://staging.plaudit.app");
/// assert_eq!(
///     resolve_asset_origin(Some("http://localhost:3000/plaudit-widget.js"), &page),
///     "http://localhost:3000",
/// );
/// assert_eq!(resolve_asset_origin(None, &[]), PRODUCTION_ORIGIN);
/// ```
#[must_use]
pub fn resolve_asset_origin(current_script_src: Option<&str>, page_script_srcs: &[&str]) -> String {
    let loader_script = || {
        page_script_srcs.iter().find(|src| {
            let path = src.split(['?', '#']).next().unwrap_or_default();
            path.ends_with(LOADER_SCRIPT_NAME)
        })
    };

    current_script_src
        .and_then(origin_of)
        .or_else(|| loader_script().and_then(|src| origin_of(src)))
        .unwrap_or(PRODUCTION_ORIGIN)
        .to_string()
}

/// Returns a deterministic container id for the `ordinal`-th embed of a
/// widget that did not name a container.
///
/// # Examples
///
/// ```
/// use plaudit_config::origin::synthesize_container_id;
///
/// let first = synthesize_container_id("w_1", 0);
/// assert!(first.starts_with("plaudit-widget-"));
/// assert_eq!(first, synthesize_container_id("w_1", 0));
/// assert_ne!(first, synthesize_container_id("w_1", 1));
/// ```
#[must_use]
pub fn synthesize_container_id(widget_id: &str, ordinal: usize) -> String {
    let name = format!("{widget_id}#{ordinal}");
    let id = Uuid::new_v5(&CONTAINER_NAMESPACE, name.as_bytes());
    format!("{CONTAINER_PREFIX}{}", id.simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_without_path() {
        assert_eq!(origin_of("https://a.example"), Some("https://a.example"));
        assert_eq!(origin_of("https://a.example#frag"), Some("https://a.example"));
        assert_eq!(origin_of("https:///path"), None);
    }

    #[test]
    fn current_script_without_origin_falls_through() {
        let page = ["https://cdn.plaudit.app/v2/plaudit-widget.js?cache=1"];
        assert_eq!(
            resolve_asset_origin(Some("/plaudit-widget.js"), &page),
            "https://cdn.plaudit.app"
        );
    }

    #[test]
    fn unrelated_scripts_are_ignored() {
        let page = ["https://cdn.example.com/plaudit-widget.js.map", "https://x.io/app.js"];
        assert_eq!(resolve_asset_origin(None, &page), PRODUCTION_ORIGIN);
    }

    #[test]
    fn synthesized_ids_differ_per_widget() {
        assert_ne!(
            synthesize_container_id("w_1", 0),
            synthesize_container_id("w_2", 0)
        );
        assert_eq!(
            synthesize_container_id("w_1", 0).len(),
            CONTAINER_PREFIX.len() + 32
        );
    }
}
