//! Global stylesheet loading and compilation.
//!
//! The global stylesheet is interleaved into every style block so shared
//! variables/mixins are in scope, then its own compiled output is excised
//! from each block's result again. It is re-read whenever a style source
//! file changes, and recompiled only when the text actually changed.

use camino::Utf8Path;
use eyre::Result;
use grass::OutputStyle;
use std::fs;

use crate::compile::compile_scss;

/// Read the configured global stylesheet source, or empty text.
///
/// An unreadable file is logged and treated as "no global styles" - never
/// fatal to the build.
pub fn load_global_scss(path: Option<&Utf8Path>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(path = %path, "failed to read global stylesheet: {e}");
            String::new()
        }
    }
}

/// The global stylesheet in source and compiled form.
#[derive(Debug, Clone, Default)]
pub struct GlobalStyle {
    /// Raw SCSS source, interleaved into every block's composite input
    pub scss: String,
    /// Compiled output, stripped back out of every block's result
    pub css: String,
}

impl GlobalStyle {
    /// Load and eagerly compile the global stylesheet.
    pub fn load(path: Option<&Utf8Path>, style: OutputStyle) -> Result<Self> {
        let scss = load_global_scss(path);
        let css = compile_scss(&scss, style)?;
        Ok(Self { scss, css })
    }

    /// Re-read the source file and recompile if the text changed.
    pub fn refresh(&mut self, path: Option<&Utf8Path>, style: OutputStyle) -> Result<()> {
        let scss = load_global_scss(path);
        if scss != self.scss {
            self.css = compile_scss(&scss, style)?;
            self.scss = scss;
            tracing::debug!("global stylesheet reloaded");
        }
        Ok(())
    }
}
