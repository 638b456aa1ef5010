use crate::expression::ast::{BinaryOp, Expr, Func, Var};
use crate::foundation::error::{GreetError, GreetResult};

/// Symbol bindings used when evaluating an expression numerically.
pub trait Env {
    /// Value of `v`, or `None` when the symbol is unbound.
    fn lookup(&self, v: Var) -> Option<f64>;
}

/// Frame bindings: time plus the canvas and object dimensions of one overlay.
///
/// Both spellings of every dimension resolve, so one `FrameEnv` evaluates text and image
/// expressions alike.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEnv {
    /// Frame time in seconds.
    pub t: f64,
    /// Canvas width.
    pub canvas_w: f64,
    /// Canvas height.
    pub canvas_h: f64,
    /// Object width (`text_w` / `overlay_w`).
    pub object_w: f64,
    /// Object height (`text_h` / `overlay_h`).
    pub object_h: f64,
    /// Scale input width (`iw`).
    pub input_w: f64,
}

impl FrameEnv {
    /// Environment for a `canvas_w`x`canvas_h` frame with an `object_w`x`object_h` overlay.
    pub fn new(canvas_w: f64, canvas_h: f64, object_w: f64, object_h: f64) -> Self {
        Self {
            t: 0.0,
            canvas_w,
            canvas_h,
            object_w,
            object_h,
            input_w: object_w,
        }
    }

    /// Copy of this environment at time `t`.
    pub fn at(self, t: f64) -> Self {
        Self { t, ..self }
    }
}

impl Env for FrameEnv {
    fn lookup(&self, v: Var) -> Option<f64> {
        Some(match v {
            Var::T | Var::FrameT => self.t,
            Var::W | Var::MainW => self.canvas_w,
            Var::H | Var::MainH => self.canvas_h,
            Var::TextW | Var::OverlayW => self.object_w,
            Var::TextH | Var::OverlayH => self.object_h,
            Var::Iw => self.input_w,
        })
    }
}

fn truth(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

impl Expr {
    /// Evaluate with the renderer's semantics: comparisons yield 0/1 and `if` branches on
    /// non-zero. Division by zero follows IEEE rules, as the renderer does.
    pub fn eval(&self, env: &impl Env) -> GreetResult<f64> {
        match self {
            Expr::Num(v) => Ok(*v),
            Expr::Var(v) => env
                .lookup(*v)
                .ok_or_else(|| GreetError::evaluation(format!("unbound symbol '{}'", v.name()))),
            Expr::Neg(inner) => Ok(-inner.eval(env)?),
            Expr::Binary { op, left, right } => {
                let a = left.eval(env)?;
                let b = right.eval(env)?;
                Ok(match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                })
            }
            Expr::Call { func, args } => {
                if args.len() != func.arity() {
                    return Err(GreetError::evaluation(format!(
                        "{}() takes {} arguments, got {}",
                        func.name(),
                        func.arity(),
                        args.len()
                    )));
                }
                let arg = |i: usize| args[i].eval(env);
                Ok(match func {
                    // Only the selected branch is evaluated.
                    Func::If => {
                        let cond = arg(0)?;
                        if cond != 0.0 { arg(1)? } else { arg(2)? }
                    }
                    Func::Lt => truth(arg(0)? < arg(1)?),
                    Func::Gte => truth(arg(0)? >= arg(1)?),
                    Func::Between => {
                        let x = arg(0)?;
                        truth(arg(1)? <= x && x <= arg(2)?)
                    }
                    Func::Min => arg(0)?.min(arg(1)?),
                    Func::Max => arg(0)?.max(arg(1)?),
                    Func::Sin => arg(0)?.sin(),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
