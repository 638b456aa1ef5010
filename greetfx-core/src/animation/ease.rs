use crate::expression::ast::Expr;

/// Easing curves used to map normalized phase progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// `p^3`: slow start, accelerating finish.
    EaseIn,
    /// `1-(1-p)^3`: fast start, decelerating finish.
    EaseOut,
    /// Smoothstep `3p^2-2p^3`: slow at both ends.
    EaseInOut,
}

impl Ease {
    /// Every easing curve, in declaration order.
    pub const ALL: [Ease; 4] = [Ease::Linear, Ease::EaseIn, Ease::EaseOut, Ease::EaseInOut];

    /// Parse an easing name. Unknown names are linear.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "ease-in" | "easein" | "in" => Self::EaseIn,
            "ease-out" | "easeout" | "out" => Self::EaseOut,
            "ease-in-out" | "easeinout" | "in-out" => Self::EaseInOut,
            "linear" => Self::Linear,
            other => {
                tracing::debug!(easing = other, "unknown easing; using linear");
                Self::Linear
            }
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }

    /// Apply this curve to a progress expression already clamped to `[0, 1]`.
    ///
    /// The progress subtree is repeated rather than bound, since the target language has no
    /// local bindings.
    pub fn apply_expr(self, p: Expr) -> Expr {
        match self {
            Self::Linear => p,
            Self::EaseIn => cube(p),
            Self::EaseOut => {
                let inv = Expr::num(1.0).sub(p);
                Expr::num(1.0).sub(cube(inv))
            }
            Self::EaseInOut => {
                let sq = p.clone().mul(p.clone());
                Expr::num(3.0)
                    .mul(sq.clone())
                    .sub(Expr::num(2.0).mul(sq).mul(p))
            }
        }
    }

    /// Apply this curve to numeric progress `p`, clamped to `[0, 1]`.
    pub fn apply(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::EaseIn => p * p * p,
            Self::EaseOut => 1.0 - (1.0 - p).powi(3),
            Self::EaseInOut => 3.0 * p * p - 2.0 * p * p * p,
        }
    }
}

fn cube(p: Expr) -> Expr {
    p.clone().mul(p.clone()).mul(p)
}

impl From<String> for Ease {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Ease> for &'static str {
    fn from(e: Ease) -> Self {
        e.as_str()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
