use crate::animation::phase::{Animation, PhaseKind, PhaseSpec};
use crate::animation::timeline::{Timeline, active, eased_progress, progress};
use crate::expression::ast::Expr;

/// Share of an overshooting entry spent settling from the peak back to `to`.
const OVERSHOOT_SETTLE: f64 = 0.3;

fn entry_size(phase: &PhaseSpec, start: f64, base: f64) -> Expr {
    let from = Expr::num(phase.from * base);
    let to = Expr::num(phase.to * base);
    let Some(peak) = phase.overshoot else {
        return Expr::lerp(from, to, eased_progress(phase, start));
    };

    // Eased rise to the peak, then a linear settle onto `to`.
    let peak = Expr::num(peak * base);
    let rise = phase.duration * PhaseSpec::OVERSHOOT_SPLIT;
    let split = start + rise;
    let rising = Expr::lerp(
        from,
        peak.clone(),
        phase.ease().apply_expr(progress(start, rise)),
    );
    let settle = phase.duration * OVERSHOOT_SETTLE;
    let settling = Expr::lerp(peak, to, progress(split, settle));
    Expr::if_else(Expr::t().lt(Expr::num(split)), rising, settling)
}

/// Compile the size of a scale-capable overlay (text font size, image width or scale).
///
/// Returns `None` when neither phase zooms, in which case `base` is used verbatim. An entry
/// zoom grows from `from * base` to `to * base`; an exit zoom shrinks from the resting size
/// back to `from * base`.
pub fn compute_size(
    start: f64,
    end: f64,
    animation: Option<&Animation>,
    base: f64,
) -> Option<Expr> {
    let anim = animation?;
    if !anim.uses(PhaseKind::Zoom) {
        return None;
    }

    let tl = Timeline::new(start, end, Some(anim));
    let is_zoom = |k: PhaseKind| k == PhaseKind::Zoom;
    let rest = anim
        .entry
        .as_ref()
        .filter(|p| is_zoom(p.kind))
        .map_or(base, |p| p.to * base);

    let entering = active(anim.entry.as_ref(), is_zoom).map(|p| entry_size(p, tl.start, base));
    let exiting = active(anim.exit.as_ref(), is_zoom).map(|p| {
        Expr::lerp(
            Expr::num(rest),
            Expr::num(p.from * base),
            eased_progress(p, tl.hold_end),
        )
    });

    Some(tl.piecewise(entering, Expr::num(rest), exiting))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/size.rs"]
mod tests;
