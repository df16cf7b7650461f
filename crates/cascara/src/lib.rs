//! Cascara - build-time SCSS aggregation for component-embedded style blocks
//!
//! A component file embeds a style block as a virtual module; the host bundler
//! hands each block to [`pipeline::StylePipeline`], which compiles it with a
//! shared global stylesheet interleaved, strips the global output back out,
//! and either returns the CSS inline (serve mode, shadow-scoped blocks) or
//! folds it into one content-hashed stylesheet asset at bundle finalization.

pub mod bundle;
pub mod compile;
pub mod config;
pub mod emit;
pub mod global;
pub mod html;
pub mod module_id;
pub mod partition;
pub mod pipeline;
pub mod residual;
