//! greetfx compiles declarative overlay timelines into per-frame expressions for a media
//! renderer's filter graph.
//!
//! A greeting video is a base video plus text and image overlays, each visible over a bounded
//! window and optionally animated with an entry phase, a hold and an exit phase.
//!
//! # Pipeline overview
//!
//! 1. **Load**: JSON -> [`Composition`] (plain data, validated once)
//! 2. **Compile**: [`Overlay`] -> [`CompiledOverlay`] (typed [`Expr`] trees for enable, x, y,
//!    alpha and size)
//! 3. **Plan**: [`Composition`] -> [`FilterGraph`] (inputs plus `filter_complex` chains)
//!
//! Expressions are built as trees and serialized once; [`Expr::eval`] evaluates the same tree
//! numerically, which is how the compiled motion is checked without a renderer.
//!
//! Running the renderer itself is left to the caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod compile;
mod composition;
mod expression;
mod foundation;

pub use animation::ease::Ease;
pub use animation::idle::apply_idle_float;
pub use animation::phase::{Animation, Axis, IdleAnimation, PhaseKind, PhaseSpec};
pub use animation::size::compute_size;
pub use animation::timeline::{Motion, Timeline, centered, compute_motion, progress};
pub use compile::filter::{FilterGraph, MediaInput, OUTPUT_LABEL, plan};
pub use compile::overlay::{CompiledOverlay, compile_overlay, compile_overlays};
pub use composition::model::{Composition, ImageOverlay, Overlay, OverlayGeometry, TextOverlay};
pub use expression::ast::{BinaryOp, Dims, Expr, Func, Var};
pub use expression::eval::{Env, FrameEnv};
pub use foundation::core::{Canvas, OverlayKind};
pub use foundation::error::{GreetError, GreetResult};
