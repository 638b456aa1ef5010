use std::fmt;
use std::path::{Path, PathBuf};

use crate::compile::overlay::{CompiledOverlay, compile_overlays};
use crate::composition::model::{Composition, ImageOverlay, Overlay, TextOverlay};
use crate::expression::ast::{Expr, Var};
use crate::foundation::error::GreetResult;

/// Label of the base video stream.
const BASE_LABEL: &str = "0:v";
/// Label of the final, output-sized stream.
pub const OUTPUT_LABEL: &str = "vout";

/// One `-i` input of the planned graph.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MediaInput {
    /// Media file.
    pub path: PathBuf,
    /// Still images are looped so they yield a frame for every base frame.
    pub looped: bool,
}

/// Planned filter graph: inputs in index order plus the `;`-separated filter chains.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FilterGraph {
    /// Inputs; index 0 is the base video.
    pub inputs: Vec<MediaInput>,
    /// Filter chains in application order.
    pub chains: Vec<String>,
    /// Label of the stream to map as output.
    pub output: String,
}

impl FilterGraph {
    /// The graph as a `filter_complex` argument.
    pub fn filter_complex(&self) -> String {
        self.chains.join(";")
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filter_complex())
    }
}

/// Accumulator threaded through the planning fold.
struct Stage {
    inputs: Vec<MediaInput>,
    chains: Vec<String>,
    label: String,
}

/// Output of a single overlay step.
struct Step {
    input: Option<MediaInput>,
    chains: Vec<String>,
    label: String,
}

impl Stage {
    fn push(mut self, step: Step) -> Self {
        self.inputs.extend(step.input);
        self.chains.extend(step.chains);
        self.label = step.label;
        self
    }
}

/// Plan the filter graph compositing every overlay of `comp` onto its base video.
///
/// Overlays are applied in list order; each step consumes the label produced by the previous
/// one. The result is scaled to `comp.output` and labelled [`OUTPUT_LABEL`].
#[tracing::instrument(skip(comp), fields(overlays = comp.overlays.len()))]
pub fn plan(comp: &Composition) -> GreetResult<FilterGraph> {
    comp.validate()?;
    let compiled = compile_overlays(&comp.overlays)?;

    let init = Stage {
        inputs: vec![MediaInput {
            path: comp.base_video.clone(),
            looped: false,
        }],
        chains: Vec::new(),
        label: BASE_LABEL.to_string(),
    };

    let stage = comp
        .overlays
        .iter()
        .zip(&compiled)
        .enumerate()
        .fold(init, |stage, (i, (overlay, c))| {
            let step = match overlay {
                Overlay::Image(img) => image_step(&stage.label, stage.inputs.len(), i, img, c),
                Overlay::Text(text) => text_step(&stage.label, i, text, c),
            };
            tracing::debug!(overlay = i, from = %stage.label, to = %step.label, "planned overlay");
            stage.push(step)
        });

    let mut chains = stage.chains;
    chains.push(format!(
        "[{}]scale={}:{}[{OUTPUT_LABEL}]",
        stage.label, comp.output.width, comp.output.height
    ));

    Ok(FilterGraph {
        inputs: stage.inputs,
        chains,
        output: OUTPUT_LABEL.to_string(),
    })
}

fn image_step(
    prev: &str,
    input_index: usize,
    i: usize,
    img: &ImageOverlay,
    c: &CompiledOverlay,
) -> Step {
    let mut prep = Vec::new();
    match (&c.size, img.width) {
        (Some(size), _) => prep.push(format!("scale=w='{size}':h=-1:eval=frame")),
        (None, Some(w)) => prep.push(format!("scale={w}:-1")),
        (None, None) => {}
    }
    prep.push("format=rgba".to_string());
    if let Some(alpha) = &c.motion.alpha {
        // geq names the stream time `T`.
        let alpha = alpha.map_vars(&|v| match v {
            Var::T => Expr::var(Var::FrameT),
            other => Expr::var(other),
        });
        prep.push(format!(
            "geq=r='r(X,Y)':g='g(X,Y)':b='b(X,Y)':a='alpha(X,Y)*({alpha})'"
        ));
    }

    let img_label = format!("img{i}");
    let out_label = format!("v{i}");
    let m = &c.motion;
    Step {
        input: Some(MediaInput {
            path: img.path.clone(),
            looped: true,
        }),
        chains: vec![
            format!("[{input_index}:v]{}[{img_label}]", prep.join(",")),
            format!(
                "[{prev}][{img_label}]overlay=x='{}':y='{}':enable='{}':eval=frame:shortest=1\
                 [{out_label}]",
                m.x, m.y, m.enable
            ),
        ],
        label: out_label,
    }
}

fn text_step(prev: &str, i: usize, text: &TextOverlay, c: &CompiledOverlay) -> Step {
    let m = &c.motion;
    let mut opts = vec![format!("text={}", escape_text(&text.text))];
    if let Some(font) = &text.font {
        opts.push(format!("fontfile={}", escape_path(font)));
    }
    let size = c.size.clone().unwrap_or_else(|| Expr::num(text.font_size));
    opts.push(format!("fontsize='{size}'"));
    opts.push(format!("fontcolor={}", escape_value(&text.color)));
    opts.push(format!("x='{}'", m.x));
    opts.push(format!("y='{}'", m.y));
    if let Some(alpha) = &m.alpha {
        opts.push(format!("alpha='{alpha}'"));
    }
    opts.push(format!("enable='{}'", m.enable));

    let out_label = format!("v{i}");
    Step {
        input: None,
        chains: vec![format!("[{prev}]drawtext={}[{out_label}]", opts.join(":"))],
        label: out_label,
    }
}

const PLAIN_PUNCT: &[char] = &['#', '.', '_', '-', '+', '/'];

fn is_plain(s: &str) -> bool {
    let plain = |c: char| c.is_ascii_alphanumeric() || PLAIN_PUNCT.contains(&c);
    !s.is_empty() && s.chars().all(plain)
}

/// Escape an option value for a `filter_complex` string.
///
/// The value is unescaped twice: once by the graph parser and once by the option parser. It is
/// quoted for the option parser (`'` spliced in as `'\''`), then every graph special
/// (`\ ' [ ] , ;`) is backslash-escaped. Plain tokens pass through untouched.
pub(crate) fn escape_value(s: &str) -> String {
    if is_plain(s) {
        return s.to_string();
    }
    let quoted = format!("'{}'", s.replace('\'', "'\\''"));
    let mut out = String::with_capacity(quoted.len() * 2);
    for ch in quoted.chars() {
        if matches!(ch, '\\' | '\'' | '[' | ']' | ',' | ';') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape `drawtext` text: `\` and `%` are expanded by the filter itself.
pub(crate) fn escape_text(s: &str) -> String {
    escape_value(&s.replace('\\', "\\\\").replace('%', "\\%"))
}

/// Escape a font path; separators are normalized to `/`.
pub(crate) fn escape_path(p: &Path) -> String {
    escape_value(&p.to_string_lossy().replace('\\', "/"))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/filter.rs"]
mod tests;
