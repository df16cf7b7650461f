//! Residual accumulation and mode-dependent emission.
//!
//! The serve/build split is modeled as two strategies behind one trait,
//! selected once when the pipeline is created rather than re-checked at
//! every call site.

use grass::OutputStyle;
use std::collections::HashMap;

use crate::module_id::StyleScope;

/// Build-scoped accumulation state. Created at build start, discarded with
/// the pipeline; nothing here outlives one build invocation.
#[derive(Debug, Clone, Default)]
pub struct AccumulationBuffer {
    /// Running concatenation of every page-scoped residual, in host visit
    /// order. Append-only during the transform phase, consumed exactly
    /// once at finalization.
    pub accumulated_css: String,
    /// Residuals of shadow-scoped blocks, keyed by module identity. These
    /// stay inline with their module and never join the page sheet.
    pub shadow_css: HashMap<String, String>,
    /// Stylesheet asset name before finalization renamed it
    pub previous_asset_name: Option<String>,
    /// Stylesheet asset name carrying the recomputed content hash
    pub current_asset_name: Option<String>,
}

impl AccumulationBuffer {
    pub fn append(&mut self, residual: &str) {
        self.accumulated_css.push_str(residual);
    }

    pub fn record_shadow(&mut self, module_id: &str, residual: &str) {
        self.shadow_css
            .insert(module_id.to_string(), residual.to_string());
    }
}

/// How one build emits compiled style: the compiler output style, whether a
/// physical stylesheet asset exists to rewrite, and how a block's residual
/// leaves the transform.
pub trait EmissionStrategy {
    /// Compiler output style, fixed for the whole build.
    fn output_style(&self) -> OutputStyle;

    /// Whether finalization produces a renamed asset whose page reference
    /// must be rewritten.
    fn rewrites_page(&self) -> bool;

    /// Route one block's residual CSS; returns the text the transformed
    /// module carries. Shadow-scoped CSS stays inline with its module,
    /// everything else folds into the shared page sheet.
    fn emit(
        &self,
        module_id: &str,
        residual: String,
        scope: StyleScope,
        buffer: &mut AccumulationBuffer,
    ) -> String {
        match scope {
            StyleScope::Shadow => {
                buffer.record_shadow(module_id, &residual);
                residual
            }
            StyleScope::Page => {
                buffer.append(&residual);
                String::new()
            }
        }
    }
}

/// Serve mode: expanded output; page-level styles funnel through one
/// growing in-memory sheet, re-served on each request - no physical asset.
pub struct ServeEmission;

impl EmissionStrategy for ServeEmission {
    fn output_style(&self) -> OutputStyle {
        OutputStyle::Expanded
    }

    fn rewrites_page(&self) -> bool {
        false
    }
}

/// Build mode: compressed output; page-level styles consolidate into the
/// single content-hashed stylesheet asset at bundle finalization.
pub struct BuildEmission;

impl EmissionStrategy for BuildEmission {
    fn output_style(&self) -> OutputStyle {
        OutputStyle::Compressed
    }

    fn rewrites_page(&self) -> bool {
        true
    }
}
