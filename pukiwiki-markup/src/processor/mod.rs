//! Wiki processing with an explicit per-call context.
//!
//! # Architecture
//!
//! - [`core`]: the render pipeline and the `WikiProcessor` implementation
//! - [`process`]: convenience entry points with error recovery
//! - [`types`]: options, the render context and the processor struct
pub mod core;
pub mod process;
pub mod types;

pub use self::{
  core::render,
  process::{RECOVERY_HTML, render_with_recovery, to_html, try_to_html},
  types::{RenderContext, WikiOptions, WikiOptionsBuilder, WikiProcessor},
};
