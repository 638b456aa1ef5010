use std::fmt;

use crate::expression::ast::{BinaryOp, Expr};

// Binding strength; a child is parenthesized when it binds looser than its slot requires.
const PREC_LOOSE: u8 = 0;
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_ATOM: u8 = 4;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Num(v) if v.is_sign_negative() && *v != 0.0 => PREC_LOOSE,
        Expr::Num(_) | Expr::Var(_) | Expr::Call { .. } => PREC_ATOM,
        Expr::Neg(_) => PREC_LOOSE,
        Expr::Binary { op, .. } => match op {
            BinaryOp::Add | BinaryOp::Sub => PREC_SUM,
            BinaryOp::Mul | BinaryOp::Div => PREC_PRODUCT,
        },
    }
}

// Ten decimals: phase boundaries such as `start + 0.7 * duration` print as `0.8`, not
// `0.7999999999999999`.
const NUM_DECIMALS: usize = 10;

fn write_num(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if !v.is_finite() {
        return write!(f, "{v}");
    }
    let fixed = format!("{v:.prec$}", prec = NUM_DECIMALS);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => f.write_str("0"),
        s => f.write_str(s),
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, min_prec: u8) -> fmt::Result {
    let wrap = precedence(expr) < min_prec;
    if wrap {
        f.write_str("(")?;
    }
    match expr {
        Expr::Num(v) => write_num(f, *v)?,
        Expr::Var(v) => f.write_str(v.name())?,
        Expr::Neg(inner) => {
            f.write_str("-")?;
            write_expr(f, inner, PREC_PRODUCT + 1)?;
        }
        Expr::Binary { op, left, right } => {
            let (sym, left_min, right_min) = match op {
                BinaryOp::Add => ("+", PREC_SUM, PREC_SUM),
                BinaryOp::Sub => ("-", PREC_SUM, PREC_SUM + 1),
                BinaryOp::Mul => ("*", PREC_PRODUCT, PREC_PRODUCT),
                BinaryOp::Div => ("/", PREC_PRODUCT, PREC_PRODUCT + 1),
            };
            write_expr(f, left, left_min)?;
            f.write_str(sym)?;
            write_expr(f, right, right_min)?;
        }
        Expr::Call { func, args } => {
            f.write_str(func.name())?;
            f.write_str("(")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_expr(f, arg, PREC_LOOSE)?;
            }
            f.write_str(")")?;
        }
    }
    if wrap {
        f.write_str(")")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, PREC_LOOSE)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/render.rs"]
mod tests;
