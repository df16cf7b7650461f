//! Plugin options and the per-build context.

use camino::Utf8PathBuf;

/// Serve vs. build - every mode-dependent branch in the pipeline keys off
/// this single flag, delivered by the host when configuration is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Interactive dev server (watch/serve)
    Serve,
    /// Final production build
    Build,
}

/// Plugin option surface.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub scss: ScssOptions,
}

/// SCSS-specific options.
#[derive(Debug, Clone, Default)]
pub struct ScssOptions {
    /// Path to a stylesheet whose definitions (variables, mixins) are made
    /// visible to every style block. `None` disables global styles.
    pub global: Option<Utf8PathBuf>,
}

/// Final configuration the host hands to the config-resolution hook.
#[derive(Debug, Clone)]
pub struct ResolvedBuildConfig {
    pub mode: BuildMode,
    /// Public base path assets are served under (e.g. `/`)
    pub base: String,
}

/// Immutable snapshot of the host configuration for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub mode: BuildMode,
    pub base: String,
}

impl BuildContext {
    pub fn new(config: ResolvedBuildConfig) -> Self {
        Self {
            mode: config.mode,
            base: config.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_snapshots_config() {
        let ctx = BuildContext::new(ResolvedBuildConfig {
            mode: BuildMode::Build,
            base: "/".to_string(),
        });
        assert_eq!(ctx.mode, BuildMode::Build);
        assert_eq!(ctx.base, "/");
    }

    #[test]
    fn test_default_options_disable_global() {
        let options = Options::default();
        assert!(options.scss.global.is_none());
    }
}
