//! SCSS compilation via grass.
//!
//! The compiler is treated as an opaque `source -> css` function; output is
//! trusted to be deterministic for identical input, which the residual
//! extraction in [`crate::residual`] depends on.

use eyre::{Result, eyre};
use grass::OutputStyle;

/// Compile SCSS text with the output style fixed for the whole build:
/// expanded while serving, compressed for the final build.
pub fn compile_scss(source: &str, style: OutputStyle) -> Result<String> {
    let options = grass::Options::default().style(style);
    grass::from_string(source, &options).map_err(|e| eyre!("SCSS compilation failed: {e}"))
}
