//! The build-scoped pipeline and its host-facing hooks.
//!
//! One [`StylePipeline`] is created per build invocation, when the host
//! resolves configuration, and threaded through every hook call. All
//! mutable accumulation state lives here - nothing is ambient, and nothing
//! leaks across builds.

use eyre::Result;

use crate::bundle::{OutputBundle, finalize_bundle};
use crate::config::{BuildContext, BuildMode, Options, ResolvedBuildConfig};
use crate::emit::{AccumulationBuffer, BuildEmission, EmissionStrategy, ServeEmission};
use crate::global::GlobalStyle;
use crate::html::rewrite_stylesheet_link;
use crate::module_id::{ModuleQuery, StyleScope, unwrap_module_literal, wrap_module_literal};
use crate::partition::partition_block;
use crate::residual::{compile_composite, extract_residual, strip_first};

/// Output of the module transform hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedModule {
    pub code: String,
}

/// One build's worth of style-aggregation state.
pub struct StylePipeline {
    options: Options,
    ctx: BuildContext,
    strategy: Box<dyn EmissionStrategy>,
    global: GlobalStyle,
    buffer: AccumulationBuffer,
    /// True until the first page-scoped block of this build has been
    /// processed; shadow blocks never consume it
    first_block: bool,
}

impl StylePipeline {
    /// Configuration resolution hook: snapshot the host configuration and
    /// eagerly compile the current global stylesheet.
    pub fn new(options: Options, config: ResolvedBuildConfig) -> Result<Self> {
        let ctx = BuildContext::new(config);
        let strategy: Box<dyn EmissionStrategy> = match ctx.mode {
            BuildMode::Serve => Box::new(ServeEmission),
            BuildMode::Build => Box::new(BuildEmission),
        };
        let global = GlobalStyle::load(options.scss.global.as_deref(), strategy.output_style())?;
        Ok(Self {
            ctx,
            options,
            strategy,
            global,
            buffer: AccumulationBuffer::default(),
            first_block: true,
        })
    }

    /// Module transform hook.
    ///
    /// Acts only on SCSS modules requested with the `raw` or `inline`
    /// query flag; everything else passes through untouched (`None`). A
    /// compiler failure on a block is logged and the module yields no
    /// output rather than aborting the rest of the build.
    pub fn transform(&mut self, code: &str, id: &str) -> Option<TransformedModule> {
        let query = ModuleQuery::parse(id);
        if query.is_scss() {
            // A style source changed: pick up edits to the global sheet
            if let Err(e) = self
                .global
                .refresh(self.options.scss.global.as_deref(), self.strategy.output_style())
            {
                tracing::error!(module = %id, "global stylesheet recompile failed: {e}");
            }
        }

        let scope = query.style_request()?;
        if !query.is_scss() {
            return None;
        }

        match self.transform_block(code, id, scope) {
            Ok(code) => Some(TransformedModule { code }),
            Err(e) => {
                tracing::error!(module = %id, "style transform failed: {e}");
                None
            }
        }
    }

    fn transform_block(&mut self, code: &str, id: &str, scope: StyleScope) -> Result<String> {
        let source = unwrap_module_literal(code);
        let block = partition_block(&source);
        let composite = compile_composite(&block, &self.global.scss, self.strategy.output_style())?;

        // Shadow blocks always strip the compiled global text: their CSS
        // stays inline and must not embed page-wide styles. Only the first
        // page-scoped block consumes the placeholder rule, so exactly one
        // global copy reaches the page sheet no matter which order the
        // host visits modules in.
        let residual = match scope {
            StyleScope::Shadow => strip_first(&composite, &self.global.css),
            StyleScope::Page => {
                let residual = extract_residual(&composite, &self.global.css, self.first_block);
                self.first_block = false;
                residual
            }
        };

        tracing::debug!(module = %id, bytes = residual.len(), "compiled style block");
        let emitted = self.strategy.emit(id, residual, scope, &mut self.buffer);
        Ok(wrap_module_literal(&emitted))
    }

    /// HTML finalization hook: substitute the hashed stylesheet name into
    /// the entry document. Unchanged while serving (no physical asset
    /// exists yet) or when finalization never renamed one.
    pub fn transform_index_html(&self, html: &str) -> String {
        if !self.strategy.rewrites_page() {
            return html.to_string();
        }
        match (
            &self.buffer.previous_asset_name,
            &self.buffer.current_asset_name,
        ) {
            (Some(old_name), Some(new_name)) => {
                rewrite_stylesheet_link(html, &self.ctx.base, old_name, new_name)
            }
            _ => html.to_string(),
        }
    }

    /// Bundle emission hook: inject the accumulated CSS into the emitted
    /// stylesheet asset and rename it. The host drives this exactly once,
    /// after all modules are processed.
    pub fn generate_bundle(&mut self, bundle: &mut OutputBundle) {
        finalize_bundle(bundle, &mut self.buffer, &self.global.css);
    }

    /// The page-level stylesheet accumulated so far. In serve mode this is
    /// the growing sheet the dev server re-serves on each request.
    pub fn page_css(&self) -> &str {
        &self.buffer.accumulated_css
    }

    /// Accumulation state, for the host and for inspection in tests.
    pub fn buffer(&self) -> &AccumulationBuffer {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_pipeline() -> StylePipeline {
        StylePipeline::new(
            Options::default(),
            ResolvedBuildConfig {
                mode: BuildMode::Serve,
                base: "/".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_non_style_module_passes_through() {
        let mut pipeline = serve_pipeline();
        assert!(pipeline.transform("export const x = 1", "/src/main.ts").is_none());
        assert!(
            pipeline
                .transform(r#"export default ".a {}""#, "/src/a.scss")
                .is_none()
        );
    }

    #[test]
    fn test_broken_block_is_skipped_not_fatal() {
        let mut pipeline = serve_pipeline();
        let broken = r#"export default ".a { color: }""#;
        assert!(pipeline.transform(broken, "/src/a.scss?raw").is_none());

        // The rest of the build keeps going
        let ok = r#"export default ".b { margin: 0; }""#;
        assert!(pipeline.transform(ok, "/src/b.scss?raw").is_some());
    }

    #[test]
    fn test_serve_page_block_accumulates() {
        let mut pipeline = serve_pipeline();
        let module = pipeline
            .transform(r#"export default ".a {\n  margin: 0;\n}""#, "/src/a.scss?raw")
            .unwrap();
        assert_eq!(module.code, "export default ``");
        assert!(pipeline.page_css().contains(".a {"));
    }

    #[test]
    fn test_serve_shadow_block_stays_inline() {
        let mut pipeline = serve_pipeline();
        let module = pipeline
            .transform(
                r#"export default ".a {\n  margin: 0;\n}""#,
                "/src/a.scss?raw=shadow",
            )
            .unwrap();
        assert!(module.code.contains(".a {"));
        assert!(pipeline.page_css().is_empty());
    }

    #[test]
    fn test_serve_html_is_untouched() {
        let pipeline = serve_pipeline();
        let html = r#"<link rel="stylesheet" crossorigin href="/assets/index-OLD.css">"#;
        assert_eq!(pipeline.transform_index_html(html), html);
    }
}
