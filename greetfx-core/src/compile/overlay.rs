use rayon::prelude::*;

use crate::animation::idle::apply_idle_float;
use crate::animation::size::compute_size;
use crate::animation::timeline::{Motion, compute_motion};
use crate::composition::model::Overlay;
use crate::expression::ast::{Expr, Var};
use crate::foundation::core::OverlayKind;
use crate::foundation::error::GreetResult;

#[derive(Clone, Debug, PartialEq)]
/// Per-frame expressions for one overlay, ready to be wired into a filter graph.
pub struct CompiledOverlay {
    /// Filter family the expressions are written for.
    pub kind: OverlayKind,
    /// Visibility, position and opacity. For text, `y` includes the idle float.
    pub motion: Motion,
    /// Font size (text) or width in pixels (image) while zooming; `None` keeps the base size.
    pub size: Option<Expr>,
}

/// Validate one overlay and compile its expressions.
pub fn compile_overlay(overlay: &Overlay) -> GreetResult<CompiledOverlay> {
    overlay.validate()?;

    let geometry = overlay.geometry();
    let mut motion = compute_motion(
        overlay.start(),
        overlay.end(),
        overlay.animation(),
        overlay.kind(),
        geometry.x.map(Expr::num),
        geometry.y.map(Expr::num),
    );

    let size = match overlay {
        Overlay::Text(text) => {
            motion.y = apply_idle_float(text.start, motion.y, text.idle.as_ref());
            let anim = text.animation.as_ref();
            compute_size(text.start, text.end, anim, text.font_size)
        }
        Overlay::Image(img) => match img.width {
            Some(w) => compute_size(img.start, img.end, img.animation.as_ref(), f64::from(w)),
            // Without a target width the zoom scales the source width.
            None => compute_size(img.start, img.end, img.animation.as_ref(), 1.0)
                .map(|factor| Expr::var(Var::Iw).mul(factor)),
        },
    };

    Ok(CompiledOverlay {
        kind: overlay.kind(),
        motion,
        size,
    })
}

/// Compile every overlay. Work is spread across threads; results keep list order.
#[tracing::instrument(skip(overlays), fields(count = overlays.len()))]
pub fn compile_overlays(overlays: &[Overlay]) -> GreetResult<Vec<CompiledOverlay>> {
    overlays
        .par_iter()
        .enumerate()
        .map(|(i, o)| compile_overlay(o).map_err(|e| e.at(format!("overlays[{i}]"))))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compile/overlay.rs"]
mod tests;
