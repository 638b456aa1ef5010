use crate::animation::ease::Ease;
use crate::foundation::error::{GreetError, GreetResult};

/// Motion performed during one phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum PhaseKind {
    /// Opacity ramp.
    Fade,
    /// Vertical slide; enters from below, exits above.
    SlideUp,
    /// Vertical slide; enters from above, exits below.
    SlideDown,
    /// Horizontal slide; enters from the right, exits to the left.
    SlideLeft,
    /// Horizontal slide; enters from the left, exits to the right.
    SlideRight,
    /// Size ramp between `from` and `to`.
    Zoom,
    /// No motion. Unknown kinds parse to this.
    #[default]
    None,
}

/// Positional axis a slide moves along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// `x`
    Horizontal,
    /// `y`
    Vertical,
}

impl PhaseKind {
    /// Parse a phase kind name. Unknown names are [`PhaseKind::None`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fade" => Self::Fade,
            "slide-up" | "slideup" => Self::SlideUp,
            "slide-down" | "slidedown" => Self::SlideDown,
            "slide-left" | "slideleft" => Self::SlideLeft,
            "slide-right" | "slideright" => Self::SlideRight,
            "zoom" => Self::Zoom,
            "none" | "" => Self::None,
            other => {
                tracing::debug!(kind = other, "unknown phase kind; no motion");
                Self::None
            }
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::SlideUp => "slide-up",
            Self::SlideDown => "slide-down",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::Zoom => "zoom",
            Self::None => "none",
        }
    }

    /// Axis moved by this kind, if it is a slide.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Self::SlideLeft | Self::SlideRight => Some(Axis::Horizontal),
            Self::SlideUp | Self::SlideDown => Some(Axis::Vertical),
            Self::Fade | Self::Zoom | Self::None => None,
        }
    }
}

impl From<String> for PhaseKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<PhaseKind> for &'static str {
    fn from(k: PhaseKind) -> Self {
        k.as_str()
    }
}

fn default_zoom_from() -> f64 {
    PhaseSpec::DEFAULT_ZOOM_FROM
}

fn default_zoom_to() -> f64 {
    PhaseSpec::DEFAULT_ZOOM_TO
}

/// One directional motion phase (entry or exit).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseSpec {
    /// Motion kind.
    pub kind: PhaseKind,
    /// Phase length in seconds.
    pub duration: f64,
    /// Easing curve; see [`PhaseSpec::ease`] for the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Ease>,
    /// Zoom start scale factor.
    #[serde(default = "default_zoom_from")]
    pub from: f64,
    /// Zoom end scale factor.
    #[serde(default = "default_zoom_to")]
    pub to: f64,
    /// Zoom peak scale factor reached before settling on `to` (entry only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overshoot: Option<f64>,
}

impl PhaseSpec {
    /// Default zoom start scale.
    pub const DEFAULT_ZOOM_FROM: f64 = 0.2;
    /// Default zoom end scale.
    pub const DEFAULT_ZOOM_TO: f64 = 1.0;
    /// Share of the entry duration spent reaching the overshoot peak.
    pub const OVERSHOOT_SPLIT: f64 = 0.7;

    /// Phase of `kind` lasting `duration` seconds with default easing and zoom factors.
    pub fn new(kind: PhaseKind, duration: f64) -> Self {
        Self {
            kind,
            duration,
            easing: None,
            from: Self::DEFAULT_ZOOM_FROM,
            to: Self::DEFAULT_ZOOM_TO,
            overshoot: None,
        }
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, ease: Ease) -> Self {
        self.easing = Some(ease);
        self
    }

    /// Set zoom factors.
    pub fn with_zoom(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Set the zoom overshoot peak.
    pub fn with_overshoot(mut self, overshoot: f64) -> Self {
        self.overshoot = Some(overshoot);
        self
    }

    /// Effective easing: the declared curve, else ease-out for an overshooting zoom, else linear.
    pub fn ease(&self) -> Ease {
        match self.easing {
            Some(e) => e,
            None if self.kind == PhaseKind::Zoom && self.overshoot.is_some() => Ease::EaseOut,
            None => Ease::Linear,
        }
    }

    /// Check duration and zoom factors.
    pub fn validate(&self) -> GreetResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(GreetError::configuration(format!(
                "{} duration must be finite and >= 0, got {}",
                self.kind.as_str(),
                self.duration
            )));
        }
        if self.kind != PhaseKind::Zoom {
            return Ok(());
        }
        for (name, v) in [("from", self.from), ("to", self.to)] {
            if !v.is_finite() || v < 0.0 {
                return Err(GreetError::configuration(format!(
                    "zoom {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if let Some(peak) = self.overshoot
            && (!peak.is_finite() || peak <= self.to)
        {
            return Err(GreetError::configuration(format!(
                "zoom overshoot must be greater than to ({}), got {peak}",
                self.to
            )));
        }
        Ok(())
    }
}

/// Entry/hold/exit timeline of one overlay.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Animation {
    /// Entry phase.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<PhaseSpec>,
    /// Seconds at rest after entry.
    pub hold: f64,
    /// Exit phase.
    #[serde(rename = "out", default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<PhaseSpec>,
}

impl Animation {
    /// Animation with the given phases and hold.
    pub fn new(entry: Option<PhaseSpec>, hold: f64, exit: Option<PhaseSpec>) -> Self {
        Self { entry, hold, exit }
    }

    /// Entry duration in seconds (zero without an entry phase).
    pub fn entry_duration(&self) -> f64 {
        self.entry.as_ref().map_or(0.0, |p| p.duration)
    }

    /// Exit duration in seconds (zero without an exit phase).
    pub fn exit_duration(&self) -> f64 {
        self.exit.as_ref().map_or(0.0, |p| p.duration)
    }

    /// Whether either phase is of `kind`.
    pub fn uses(&self, kind: PhaseKind) -> bool {
        self.entry.as_ref().is_some_and(|p| p.kind == kind)
            || self.exit.as_ref().is_some_and(|p| p.kind == kind)
    }

    /// Check both phases and the hold.
    pub fn validate(&self) -> GreetResult<()> {
        if let Some(p) = &self.entry {
            p.validate().map_err(|e| e.at("in"))?;
        }
        if !self.hold.is_finite() || self.hold < 0.0 {
            return Err(GreetError::configuration(format!(
                "hold must be finite and >= 0, got {}",
                self.hold
            )));
        }
        if let Some(p) = &self.exit {
            p.validate().map_err(|e| e.at("out"))?;
        }
        Ok(())
    }
}

/// Continuous vertical float layered on a text overlay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdleAnimation {
    /// Peak offset in pixels.
    pub amplitude: f64,
    /// Oscillations per second.
    pub speed: f64,
}

impl IdleAnimation {
    /// Check amplitude and speed.
    pub fn validate(&self) -> GreetResult<()> {
        if !self.amplitude.is_finite() {
            return Err(GreetError::configuration("idle amplitude must be finite"));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(GreetError::configuration(format!(
                "idle speed must be finite and >= 0, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/phase.rs"]
mod tests;
