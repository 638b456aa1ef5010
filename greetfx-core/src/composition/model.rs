use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::animation::phase::{Animation, IdleAnimation};
use crate::foundation::core::{Canvas, OverlayKind};
use crate::foundation::error::{GreetError, GreetResult};

/// Resting placement of an overlay's top-left corner, in canvas pixels.
///
/// A missing coordinate centers the overlay on that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayGeometry {
    /// Resting x, or centered when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Resting y, or centered when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl OverlayGeometry {
    fn validate(&self) -> GreetResult<()> {
        for (name, v) in [("x", self.x), ("y", self.y)] {
            if let Some(v) = v
                && !v.is_finite()
            {
                return Err(GreetError::configuration(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Still image composited over the base video.
pub struct ImageOverlay {
    /// Image file.
    pub path: PathBuf,
    /// Seconds at which the overlay appears.
    pub start: f64,
    /// Seconds after which the overlay is never drawn.
    pub end: f64,
    /// Target width in pixels; the height follows the aspect ratio. Native size when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Resting position.
    #[serde(flatten)]
    pub geometry: OverlayGeometry,
    /// Entry/hold/exit animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

fn default_font_size() -> f64 {
    TextOverlay::DEFAULT_FONT_SIZE
}

fn default_color() -> String {
    TextOverlay::DEFAULT_COLOR.to_string()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Line of text drawn over the base video.
pub struct TextOverlay {
    /// Text to draw.
    pub text: String,
    /// Font file; the renderer's default font when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Font color in any notation the renderer accepts (`white`, `#FBE6D3`).
    #[serde(default = "default_color")]
    pub color: String,
    /// Seconds at which the overlay appears.
    pub start: f64,
    /// Seconds after which the overlay is never drawn.
    pub end: f64,
    /// Resting position.
    #[serde(flatten)]
    pub geometry: OverlayGeometry,
    /// Entry/hold/exit animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    /// Continuous vertical float.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle: Option<IdleAnimation>,
}

impl TextOverlay {
    /// Font size used when a text overlay does not declare one.
    pub const DEFAULT_FONT_SIZE: f64 = 48.0;
    /// Font color used when a text overlay does not declare one.
    pub const DEFAULT_COLOR: &'static str = "white";

    /// Text overlay drawn over `[start, end]` with default font, size and color.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            font: None,
            font_size: Self::DEFAULT_FONT_SIZE,
            color: default_color(),
            start,
            end,
            geometry: OverlayGeometry::default(),
            animation: None,
            idle: None,
        }
    }
}

/// Text or image element composited onto the base video for a bounded time window.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Overlay {
    /// Image overlay.
    Image(ImageOverlay),
    /// Text overlay.
    Text(TextOverlay),
}

impl Overlay {
    /// Filter family used to draw this overlay.
    pub fn kind(&self) -> OverlayKind {
        match self {
            Self::Image(_) => OverlayKind::Image,
            Self::Text(_) => OverlayKind::Text,
        }
    }

    /// Declared start in seconds.
    pub fn start(&self) -> f64 {
        match self {
            Self::Image(o) => o.start,
            Self::Text(o) => o.start,
        }
    }

    /// Declared end in seconds.
    pub fn end(&self) -> f64 {
        match self {
            Self::Image(o) => o.end,
            Self::Text(o) => o.end,
        }
    }

    /// Resting position.
    pub fn geometry(&self) -> OverlayGeometry {
        match self {
            Self::Image(o) => o.geometry,
            Self::Text(o) => o.geometry,
        }
    }

    /// Animation, if any.
    pub fn animation(&self) -> Option<&Animation> {
        match self {
            Self::Image(o) => o.animation.as_ref(),
            Self::Text(o) => o.animation.as_ref(),
        }
    }

    /// Check timing, geometry, animation and kind-specific fields.
    pub fn validate(&self) -> GreetResult<()> {
        let (start, end) = (self.start(), self.end());
        if !start.is_finite() || start < 0.0 {
            return Err(GreetError::configuration(format!(
                "start must be finite and >= 0, got {start}"
            )));
        }
        if !end.is_finite() || end < start {
            return Err(GreetError::configuration(format!(
                "end ({end}) must be finite and >= start ({start})"
            )));
        }
        self.geometry().validate()?;
        if let Some(anim) = self.animation() {
            anim.validate().map_err(|e| e.at("animation"))?;
        }

        match self {
            Self::Image(o) => {
                if o.path.as_os_str().is_empty() {
                    return Err(GreetError::configuration("image path must be non-empty"));
                }
                if o.width == Some(0) {
                    return Err(GreetError::configuration("image width must be > 0"));
                }
            }
            Self::Text(o) => {
                if o.text.is_empty() {
                    return Err(GreetError::configuration("text must be non-empty"));
                }
                if !o.font_size.is_finite() || o.font_size <= 0.0 {
                    return Err(GreetError::configuration(format!(
                        "font_size must be finite and > 0, got {}",
                        o.font_size
                    )));
                }
                if o.color.trim().is_empty() {
                    return Err(GreetError::configuration("color must be non-empty"));
                }
                if let Some(idle) = &o.idle {
                    idle.validate().map_err(|e| e.at("idle"))?;
                }
            }
        }
        Ok(())
    }
}

impl From<ImageOverlay> for Overlay {
    fn from(o: ImageOverlay) -> Self {
        Self::Image(o)
    }
}

impl From<TextOverlay> for Overlay {
    fn from(o: TextOverlay) -> Self {
        Self::Text(o)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A greeting video: base video plus overlays composited back-to-front in list order.
///
/// Compositions are plain data; they can be built in code or loaded from JSON, and are
/// validated once before any expression is generated.
pub struct Composition {
    /// Video every overlay is composited onto.
    pub base_video: PathBuf,
    /// Resolution the composited result is scaled to.
    #[serde(default)]
    pub output: Canvas,
    /// Overlays, back-to-front.
    #[serde(default)]
    pub overlays: Vec<Overlay>,
}

impl Composition {
    /// Parse a composition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GreetResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GreetError::serde(format!("parse composition JSON: {e}")))
    }

    /// Parse a composition from a JSON string.
    pub fn from_json_str(s: &str) -> GreetResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| GreetError::serde(format!("parse composition JSON: {e}")))
    }

    /// Parse a composition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GreetResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open composition JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> GreetResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GreetError::serde(format!("serialize composition JSON: {e}")))
    }

    /// Validate the output canvas and every overlay.
    pub fn validate(&self) -> GreetResult<()> {
        if self.base_video.as_os_str().is_empty() {
            return Err(GreetError::configuration("base_video must be non-empty"));
        }
        Canvas::new(self.output.width, self.output.height).map_err(|e| e.at("output"))?;
        for (i, overlay) in self.overlays.iter().enumerate() {
            overlay
                .validate()
                .map_err(|e| e.at(format!("overlays[{i}]")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
