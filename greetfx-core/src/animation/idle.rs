use std::f64::consts::TAU;

use crate::animation::phase::IdleAnimation;
use crate::expression::ast::Expr;

/// Layer a continuous float on a vertical position:
/// `base_y + amplitude * sin(2*pi*speed*(t - start))`.
///
/// The sinusoid is anchored at `start` and is not gated by phase; it rides on whatever
/// position the slide compiler produced.
pub fn apply_idle_float(start: f64, base_y: Expr, idle: Option<&IdleAnimation>) -> Expr {
    let Some(idle) = idle else {
        return base_y;
    };
    let phase = Expr::num(TAU * idle.speed).mul(Expr::t().sub(Expr::num(start)));
    base_y.add(Expr::num(idle.amplitude).mul(phase.sin()))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/idle.rs"]
mod tests;
