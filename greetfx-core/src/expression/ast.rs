use crate::foundation::core::OverlayKind;

/// Symbols understood by the downstream frame renderer.
///
/// The compiler never needs their numeric values; they are resolved once per rendered frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Var {
    /// Timestamp of the frame being rendered, in seconds.
    T,
    /// Per-pixel filter timestamp (`geq` spells time as `T`).
    FrameT,
    /// `drawtext` canvas width.
    W,
    /// `drawtext` canvas height.
    H,
    /// Rendered text width.
    TextW,
    /// Rendered text height.
    TextH,
    /// `overlay` background width.
    MainW,
    /// `overlay` background height.
    MainH,
    /// `overlay` foreground width.
    OverlayW,
    /// `overlay` foreground height.
    OverlayH,
    /// `scale` input width.
    Iw,
}

impl Var {
    /// Name of the symbol in the renderer's expression language.
    pub fn name(self) -> &'static str {
        match self {
            Self::T => "t",
            Self::FrameT => "T",
            Self::W => "w",
            Self::H => "h",
            Self::TextW => "text_w",
            Self::TextH => "text_h",
            Self::MainW => "main_w",
            Self::MainH => "main_h",
            Self::OverlayW => "overlay_w",
            Self::OverlayH => "overlay_h",
            Self::Iw => "iw",
        }
    }
}

/// Canvas and object dimension symbols for one overlay kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dims {
    /// Canvas width symbol.
    pub canvas_w: Var,
    /// Canvas height symbol.
    pub canvas_h: Var,
    /// Overlay object width symbol.
    pub object_w: Var,
    /// Overlay object height symbol.
    pub object_h: Var,
}

impl Dims {
    /// Symbols available inside `drawtext` options.
    pub const TEXT: Dims = Dims {
        canvas_w: Var::W,
        canvas_h: Var::H,
        object_w: Var::TextW,
        object_h: Var::TextH,
    };

    /// Symbols available inside `overlay` options.
    pub const IMAGE: Dims = Dims {
        canvas_w: Var::MainW,
        canvas_h: Var::MainH,
        object_w: Var::OverlayW,
        object_h: Var::OverlayH,
    };

    /// Symbol set used for `kind`.
    pub fn for_kind(kind: OverlayKind) -> Self {
        match kind {
            OverlayKind::Text => Self::TEXT,
            OverlayKind::Image => Self::IMAGE,
        }
    }
}

/// Binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
}

/// Built-in functions of the renderer's expression language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    /// `if(cond, then, else)`; the condition is true when non-zero.
    If,
    /// `lt(a, b)` is 1 when `a < b`.
    Lt,
    /// `gte(a, b)` is 1 when `a >= b`.
    Gte,
    /// `between(x, lo, hi)` is 1 when `lo <= x <= hi`.
    Between,
    /// `min(a, b)`
    Min,
    /// `max(a, b)`
    Max,
    /// `sin(x)`, radians.
    Sin,
}

impl Func {
    /// Function name as written in the renderer's language.
    pub fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Between => "between",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sin => "sin",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Sin => 1,
            Self::Lt | Self::Gte | Self::Min | Self::Max => 2,
            Self::If | Self::Between => 3,
        }
    }
}

/// Typed expression node.
///
/// Expressions are built with the constructors below and serialized once through
/// [`std::fmt::Display`].
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numeric constant.
    Num(f64),
    /// Renderer symbol.
    Var(Var),
    /// Arithmetic negation.
    Neg(Box<Expr>),
    /// Binary arithmetic.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Built-in function call.
    Call {
        /// Function.
        func: Func,
        /// Arguments, exactly [`Func::arity`] of them.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Constant node.
    pub fn num(v: f64) -> Self {
        Self::Num(v)
    }

    /// Symbol node.
    pub fn var(v: Var) -> Self {
        Self::Var(v)
    }

    /// The frame time `t`.
    pub fn t() -> Self {
        Self::Var(Var::T)
    }

    /// Constant value of this node, if it is one.
    pub fn as_num(&self) -> Option<f64> {
        match *self {
            Self::Num(v) => Some(v),
            _ => None,
        }
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn call(func: Func, args: Vec<Expr>) -> Self {
        debug_assert_eq!(args.len(), func.arity());
        Self::Call { func, args }
    }

    /// `self + rhs`, folding constants and `+ 0`.
    pub fn add(self, rhs: Expr) -> Self {
        match (self.as_num(), rhs.as_num()) {
            (Some(a), Some(b)) => Self::Num(a + b),
            (_, Some(b)) if b == 0.0 => self,
            (Some(a), _) if a == 0.0 => rhs,
            _ => Self::binary(BinaryOp::Add, self, rhs),
        }
    }

    /// `self - rhs`, folding constants and `- 0`.
    pub fn sub(self, rhs: Expr) -> Self {
        match (self.as_num(), rhs.as_num()) {
            (Some(a), Some(b)) => Self::Num(a - b),
            (_, Some(b)) if b == 0.0 => self,
            (Some(a), _) if a == 0.0 => rhs.neg(),
            _ => Self::binary(BinaryOp::Sub, self, rhs),
        }
    }

    /// `self * rhs`, folding constants, `* 1` and `* 0`.
    pub fn mul(self, rhs: Expr) -> Self {
        match (self.as_num(), rhs.as_num()) {
            (Some(a), Some(b)) => Self::Num(a * b),
            (Some(a), _) if a == 1.0 => rhs,
            (_, Some(b)) if b == 1.0 => self,
            (Some(a), _) | (_, Some(a)) if a == 0.0 => Self::Num(0.0),
            _ => Self::binary(BinaryOp::Mul, self, rhs),
        }
    }

    /// `self / rhs`, folding `/ 1`. Division by a literal zero is never folded.
    pub fn div(self, rhs: Expr) -> Self {
        match (self.as_num(), rhs.as_num()) {
            (Some(a), Some(b)) if b != 0.0 => Self::Num(a / b),
            (_, Some(b)) if b == 1.0 => self,
            _ => Self::binary(BinaryOp::Div, self, rhs),
        }
    }

    /// `-self`.
    pub fn neg(self) -> Self {
        match self {
            Self::Num(v) => Self::Num(-v),
            Self::Neg(inner) => *inner,
            other => Self::Neg(Box::new(other)),
        }
    }

    /// `if(cond, then, otherwise)`.
    pub fn if_else(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        if then == otherwise {
            return then;
        }
        Self::call(Func::If, vec![cond, then, otherwise])
    }

    /// `lt(self, rhs)`.
    pub fn lt(self, rhs: Expr) -> Self {
        Self::call(Func::Lt, vec![self, rhs])
    }

    /// `gte(self, rhs)`.
    pub fn gte(self, rhs: Expr) -> Self {
        Self::call(Func::Gte, vec![self, rhs])
    }

    /// `between(self, lo, hi)`.
    pub fn between(self, lo: Expr, hi: Expr) -> Self {
        Self::call(Func::Between, vec![self, lo, hi])
    }

    /// `min(self, rhs)`.
    pub fn min(self, rhs: Expr) -> Self {
        match (self.as_num(), rhs.as_num()) {
            (Some(a), Some(b)) => Self::Num(a.min(b)),
            _ => Self::call(Func::Min, vec![self, rhs]),
        }
    }

    /// `max(self, rhs)`.
    pub fn max(self, rhs: Expr) -> Self {
        match (self.as_num(), rhs.as_num()) {
            (Some(a), Some(b)) => Self::Num(a.max(b)),
            _ => Self::call(Func::Max, vec![self, rhs]),
        }
    }

    /// `sin(self)`.
    pub fn sin(self) -> Self {
        match self.as_num() {
            Some(v) => Self::Num(v.sin()),
            None => Self::call(Func::Sin, vec![self]),
        }
    }

    /// `min(max(self, 0), 1)`.
    pub fn clamp01(self) -> Self {
        self.max(Self::Num(0.0)).min(Self::Num(1.0))
    }

    /// `a + p * (b - a)`: interpolate from `a` to `b` by progress `p`.
    pub fn lerp(a: Expr, b: Expr, p: Expr) -> Self {
        let delta = b.sub(a.clone());
        a.add(p.mul(delta))
    }

    /// Rewrite every symbol through `f`.
    pub fn map_vars(&self, f: &impl Fn(Var) -> Expr) -> Expr {
        match self {
            Self::Num(v) => Self::Num(*v),
            Self::Var(v) => f(*v),
            Self::Neg(inner) => Self::Neg(Box::new(inner.map_vars(f))),
            Self::Binary { op, left, right } => Self::Binary {
                op: *op,
                left: Box::new(left.map_vars(f)),
                right: Box::new(right.map_vars(f)),
            },
            Self::Call { func, args } => Self::Call {
                func: *func,
                args: args.iter().map(|a| a.map_vars(f)).collect(),
            },
        }
    }

    /// Whether `v` appears anywhere in the expression.
    pub fn mentions(&self, v: Var) -> bool {
        match self {
            Self::Num(_) => false,
            Self::Var(x) => *x == v,
            Self::Neg(inner) => inner.mentions(v),
            Self::Binary { left, right, .. } => left.mentions(v) || right.mentions(v),
            Self::Call { args, .. } => args.iter().any(|a| a.mentions(v)),
        }
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<Var> for Expr {
    fn from(v: Var) -> Self {
        Self::Var(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/ast.rs"]
mod tests;
