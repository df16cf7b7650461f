//! Composite compilation and residual extraction.
//!
//! Each block is compiled together with the global stylesheet so its
//! definitions are in scope, then the global's own compiled output is
//! removed again from the result. The removal is a first-occurrence
//! substring replace and relies on the compiler producing byte-identical
//! output for the same global input across all blocks of a build.

use eyre::Result;
use grass::OutputStyle;

use crate::compile::compile_scss;
use crate::partition::PartitionedBlock;

/// Output the compiler stands in for a stylesheet that produced no rules.
/// The first page-scoped block of a build strips this instead of the
/// compiled global text, which has not been emitted as output bytes yet.
pub const EMPTY_OUTPUT_PLACEHOLDER: &str = "/**/";

/// Compile one partitioned block with the global stylesheet interleaved:
/// import-like statements stay at the top (the compiler rejects anything
/// before them), the global source goes next so its definitions are in
/// scope for the remaining statements.
pub fn compile_composite(
    block: &PartitionedBlock,
    global_scss: &str,
    style: OutputStyle,
) -> Result<String> {
    let composite = format!(
        "{}\n{}\n{}",
        block.imports.join("\n"),
        global_scss,
        block.other.join("\n")
    );
    compile_scss(&composite, style)
}

/// Remove the first occurrence of `needle` from `haystack`.
///
/// Zero occurrences leave the input untouched: when compiler output for
/// the global text is not found verbatim, the residual silently keeps a
/// duplicated global block rather than failing the build.
pub fn strip_first(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    haystack.replacen(needle, "", 1)
}

/// Extract a block's own contribution from its composite output by removing
/// the compiled global text - or, for the very first page-scoped block of
/// the build, the compiler's empty-output placeholder (so that one copy of
/// the global output survives into the page sheet).
pub fn extract_residual(composite_css: &str, global_css: &str, first_block: bool) -> String {
    let needle = if first_block {
        EMPTY_OUTPUT_PLACEHOLDER
    } else {
        global_css
    };
    strip_first(composite_css, needle)
}
