use crate::foundation::error::{GreetError, GreetResult};

/// Pixel dimensions of a video frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Output resolution used when a composition does not declare one.
    pub const DEFAULT_OUTPUT: Canvas = Canvas {
        width: 1920,
        height: 1080,
    };

    /// Create a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> GreetResult<Self> {
        if width == 0 || height == 0 {
            return Err(GreetError::configuration("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Parse a `WIDTHxHEIGHT` string such as `1080x1920`.
    pub fn parse(s: &str) -> GreetResult<Self> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| GreetError::configuration(format!("expected WxH, got '{s}'")))?;
        let parse_dim = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| GreetError::configuration(format!("invalid dimension '{v}': {e}")))
        };
        Self::new(parse_dim(w)?, parse_dim(h)?)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT_OUTPUT
    }
}

/// Which filter an overlay is drawn with; decides the symbol set its expressions use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// Drawn by `drawtext` (`w`, `h`, `text_w`, `text_h`).
    Text,
    /// Composited by `overlay` (`main_w`, `main_h`, `overlay_w`, `overlay_h`).
    Image,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
