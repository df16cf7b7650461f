//! Output bundle model and stylesheet finalization.
//!
//! The bundle itself is owned by the host; the finalizer mutates exactly
//! one entry: the main stylesheet asset. The accumulated residual CSS is
//! appended, the content hash recomputed, and the asset renamed in place
//! so the page can link the cache-busted name.

use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use crate::emit::AccumulationBuffer;
use crate::residual::{EMPTY_OUTPUT_PLACEHOLDER, strip_first};

/// Naming convention of the host's default main stylesheet asset.
const MAIN_STYLESHEET_PREFIX: &str = "assets/index-";
const STYLESHEET_EXT: &str = ".css";

/// One emitted asset. Owned by the host bundler; referenced here only to
/// rewrite the main stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAsset {
    /// File name the asset will be written under, kept in sync with its
    /// bundle key
    pub file_name: String,
    pub source: String,
}

/// The host's mutable mapping of output file name to asset, in emission
/// order.
pub type OutputBundle = IndexMap<String, OutputAsset>;

/// Short content hash for cache busting: SHA-256, truncated to 8 hex
/// characters. Collision risk is negligible for a single build's asset set.
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    hex::encode(digest)[..8].to_string()
}

/// Substitute a new hash into an `index-<hash>.css` asset name.
/// Names outside the pattern come back unchanged.
pub fn hashed_asset_name(file_name: &str, hash: &str) -> String {
    match file_name.rfind("index-") {
        Some(pos) if file_name.ends_with(STYLESHEET_EXT) => {
            format!("{}index-{hash}{STYLESHEET_EXT}", &file_name[..pos])
        }
        _ => file_name.to_string(),
    }
}

/// Inject the accumulated residual CSS into the host's main stylesheet
/// asset, recompute its content hash and rename it in the bundle mapping.
/// Runs once per build, after all modules are transformed.
///
/// A bundle with no matching asset is left untouched; the accumulated CSS
/// is dropped for this build.
pub fn finalize_bundle(
    bundle: &mut OutputBundle,
    buffer: &mut AccumulationBuffer,
    global_css: &str,
) {
    let Some(old_name) = bundle
        .keys()
        .find(|name| name.starts_with(MAIN_STYLESHEET_PREFIX) && name.ends_with(STYLESHEET_EXT))
        .cloned()
    else {
        tracing::warn!(
            "no {MAIN_STYLESHEET_PREFIX}*{STYLESHEET_EXT} asset in bundle, accumulated styles dropped"
        );
        return;
    };
    let Some(mut asset) = bundle.shift_remove(&old_name) else {
        return;
    };

    // The accumulated CSS carries one copy of the compiled global block
    // (the first block only stripped the placeholder). If the host's own
    // stylesheet already contains it, strip that copy before appending;
    // otherwise strip the leading placeholder and keep the copy.
    let needle = if !global_css.is_empty() && asset.source.contains(global_css) {
        global_css
    } else {
        EMPTY_OUTPUT_PLACEHOLDER
    };
    asset
        .source
        .push_str(&strip_first(&buffer.accumulated_css, needle));

    let hash = content_hash(&asset.source);
    let new_name = hashed_asset_name(&old_name, &hash);
    tracing::info!(old = %old_name, new = %new_name, "stylesheet asset finalized");

    buffer.previous_asset_name = Some(old_name);
    buffer.current_asset_name = Some(new_name.clone());
    asset.file_name = new_name.clone();
    bundle.insert(new_name, asset);
}
