use crate::animation::phase::{Animation, Axis, PhaseKind, PhaseSpec};
use crate::expression::ast::{Dims, Expr};
use crate::foundation::core::OverlayKind;

/// Phase boundary times of one overlay, in seconds.
///
/// Phases are strictly sequential: entering `[start, in_end)`, holding `[in_end, hold_end)`,
/// exiting `[hold_end, out_end]`. The overlay is drawn during `[start, clamped_end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    /// Declared start.
    pub start: f64,
    /// End of the entry phase.
    pub in_end: f64,
    /// End of the hold phase.
    pub hold_end: f64,
    /// End of the exit phase.
    pub out_end: f64,
    /// `min(out_end, declared end)`.
    pub clamped_end: f64,
}

impl Timeline {
    /// Derive boundaries for an overlay declared over `[start, end]`.
    ///
    /// Without an animation the overlay simply holds for the whole declared window.
    pub fn new(start: f64, end: f64, animation: Option<&Animation>) -> Self {
        let Some(anim) = animation else {
            return Self {
                start,
                in_end: start,
                hold_end: end,
                out_end: end,
                clamped_end: end,
            };
        };

        let in_end = start + anim.entry_duration();
        let hold_end = in_end + anim.hold;
        let out_end = hold_end + anim.exit_duration();
        let clamped_end = out_end.min(end);
        if clamped_end < out_end {
            tracing::debug!(out_end, end, "window clamped to declared end");
        }

        Self {
            start,
            in_end,
            hold_end,
            out_end,
            clamped_end,
        }
    }

    /// Predicate that is true while the overlay is drawn.
    pub fn enable(&self) -> Expr {
        Expr::t().between(Expr::num(self.start), Expr::num(self.clamped_end))
    }

    /// Select between phase expressions by comparing `t` against the phase boundaries.
    ///
    /// A missing phase falls through to `rest`.
    pub fn piecewise(&self, entering: Option<Expr>, rest: Expr, exiting: Option<Expr>) -> Expr {
        let after_entry = match exiting {
            Some(x) => Expr::if_else(Expr::t().lt(Expr::num(self.hold_end)), rest, x),
            None => rest,
        };
        match entering {
            Some(e) => Expr::if_else(Expr::t().lt(Expr::num(self.in_end)), e, after_entry),
            None => after_entry,
        }
    }
}

/// Normalized progress through a phase starting at `phase_start`, clamped to `[0, 1]`.
///
/// A zero-length phase is already complete.
pub fn progress(phase_start: f64, duration: f64) -> Expr {
    if duration <= 0.0 {
        return Expr::num(1.0);
    }
    Expr::t()
        .sub(Expr::num(phase_start))
        .div(Expr::num(duration))
        .clamp01()
}

/// Eased progress of `phase` starting at `phase_start`.
pub(crate) fn eased_progress(phase: &PhaseSpec, phase_start: f64) -> Expr {
    let p = progress(phase_start, phase.duration);
    phase.ease().apply_expr(p)
}

/// Phase that takes part in the animation: the right kind and a non-zero length.
pub(crate) fn active(
    phase: Option<&PhaseSpec>,
    pred: impl Fn(PhaseKind) -> bool,
) -> Option<&PhaseSpec> {
    phase.filter(|p| pred(p.kind) && p.duration > 0.0)
}

/// Compiled visibility, position and opacity of one overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    /// True while the overlay is drawn.
    pub enable: Expr,
    /// Horizontal position of the overlay's left edge.
    pub x: Expr,
    /// Vertical position of the overlay's top edge.
    pub y: Expr,
    /// Opacity in `[0, 1]`; only present when a fade was requested.
    pub alpha: Option<Expr>,
}

/// Centered placement of an object along `axis`: `(canvas - object) / 2`.
pub fn centered(dims: Dims, axis: Axis) -> Expr {
    let (canvas, object) = match axis {
        Axis::Horizontal => (dims.canvas_w, dims.object_w),
        Axis::Vertical => (dims.canvas_h, dims.object_h),
    };
    Expr::var(canvas).sub(Expr::var(object)).div(Expr::num(2.0))
}

// Off-screen position a slide enters from.
fn entry_offset(kind: PhaseKind, dims: Dims) -> Option<Expr> {
    match kind {
        PhaseKind::SlideLeft => Some(Expr::var(dims.canvas_w)),
        PhaseKind::SlideRight => Some(Expr::var(dims.object_w).neg()),
        PhaseKind::SlideUp => Some(Expr::var(dims.canvas_h)),
        PhaseKind::SlideDown => Some(Expr::var(dims.object_h).neg()),
        PhaseKind::Fade | PhaseKind::Zoom | PhaseKind::None => None,
    }
}

// Off-screen position a slide exits towards.
fn exit_offset(kind: PhaseKind, dims: Dims) -> Option<Expr> {
    match kind {
        PhaseKind::SlideLeft => Some(Expr::var(dims.object_w).neg()),
        PhaseKind::SlideRight => Some(Expr::var(dims.canvas_w)),
        PhaseKind::SlideUp => Some(Expr::var(dims.object_h).neg()),
        PhaseKind::SlideDown => Some(Expr::var(dims.canvas_h)),
        PhaseKind::Fade | PhaseKind::Zoom | PhaseKind::None => None,
    }
}

fn axis_position(tl: &Timeline, anim: &Animation, axis: Axis, dims: Dims, rest: Expr) -> Expr {
    let on_axis = |k: PhaseKind| k.axis() == Some(axis);

    let entering = active(anim.entry.as_ref(), on_axis).and_then(|p| {
        let from = entry_offset(p.kind, dims)?;
        Some(Expr::lerp(from, rest.clone(), eased_progress(p, tl.start)))
    });
    let exiting = active(anim.exit.as_ref(), on_axis).and_then(|p| {
        let to = exit_offset(p.kind, dims)?;
        Some(Expr::lerp(rest.clone(), to, eased_progress(p, tl.hold_end)))
    });

    tl.piecewise(entering, rest, exiting)
}

fn opacity(tl: &Timeline, anim: &Animation) -> Option<Expr> {
    if !anim.uses(PhaseKind::Fade) {
        return None;
    }
    let is_fade = |k: PhaseKind| k == PhaseKind::Fade;
    let entering = active(anim.entry.as_ref(), is_fade).map(|p| eased_progress(p, tl.start));
    let exiting = active(anim.exit.as_ref(), is_fade)
        .map(|p| Expr::num(1.0).sub(eased_progress(p, tl.hold_end)));
    Some(tl.piecewise(entering, Expr::num(1.0), exiting))
}

/// Compile the visibility window, position and opacity of an overlay declared over
/// `[start, end]`.
///
/// `rest_x`/`rest_y` default to centered placement. Horizontal slides only touch `x` and
/// vertical slides only touch `y`; an axis without a slide stays at its rest value.
pub fn compute_motion(
    start: f64,
    end: f64,
    animation: Option<&Animation>,
    kind: OverlayKind,
    rest_x: Option<Expr>,
    rest_y: Option<Expr>,
) -> Motion {
    let dims = Dims::for_kind(kind);
    let tl = Timeline::new(start, end, animation);
    let rest_x = rest_x.unwrap_or_else(|| centered(dims, Axis::Horizontal));
    let rest_y = rest_y.unwrap_or_else(|| centered(dims, Axis::Vertical));

    let Some(anim) = animation else {
        return Motion {
            enable: tl.enable(),
            x: rest_x,
            y: rest_y,
            alpha: None,
        };
    };

    Motion {
        enable: tl.enable(),
        x: axis_position(&tl, anim, Axis::Horizontal, dims, rest_x),
        y: axis_position(&tl, anim, Axis::Vertical, dims, rest_y),
        alpha: opacity(&tl, anim),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
