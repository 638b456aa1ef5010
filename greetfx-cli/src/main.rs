use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use greetfx::{Canvas, Composition, Expr, FrameEnv};

#[derive(Parser, Debug)]
#[command(name = "greetfx", version)]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a composition.
    Validate(ValidateArgs),
    /// Print the planned filter graph as JSON.
    Plan(PlanArgs),
    /// Evaluate one overlay's compiled expressions at a point in time.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the plan here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Overlay index (0-based).
    #[arg(long)]
    overlay: usize,

    /// Time in seconds.
    #[arg(long)]
    t: f64,

    /// Canvas size as WxH; defaults to the composition's output size.
    #[arg(long)]
    canvas: Option<String>,

    /// Rendered overlay size as WxH.
    #[arg(long, default_value = "100x100")]
    object: String,
}

fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn load(path: &Path) -> anyhow::Result<Composition> {
    let comp = Composition::from_path(path)?;
    comp.validate()?;
    tracing::debug!(overlays = comp.overlays.len(), "loaded composition");
    Ok(comp)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let comp = load(&args.in_path)?;
    eprintln!(
        "ok: {} overlay(s), output {}x{}",
        comp.overlays.len(),
        comp.output.width,
        comp.output.height
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let comp = load(&args.in_path)?;
    let graph = greetfx::plan(&comp)?;
    let doc = serde_json::json!({
        "inputs": graph.inputs,
        "filter_complex": graph.filter_complex(),
        "output": graph.output,
    });
    let text = serde_json::to_string_pretty(&doc).context("serialize plan")?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, text).with_context(|| format!("write plan '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let comp = load(&args.in_path)?;
    let Some(overlay) = comp.overlays.get(args.overlay) else {
        anyhow::bail!(
            "overlay {} out of range ({} overlays)",
            args.overlay,
            comp.overlays.len()
        );
    };
    let canvas = match &args.canvas {
        Some(s) => Canvas::parse(s)?,
        None => comp.output,
    };
    let object = Canvas::parse(&args.object)?;

    let compiled = greetfx::compile_overlay(overlay)?;
    let env = FrameEnv::new(
        f64::from(canvas.width),
        f64::from(canvas.height),
        f64::from(object.width),
        f64::from(object.height),
    )
    .at(args.t);
    let eval = |e: &Expr| e.eval(&env);
    let eval_opt = |e: &Option<Expr>| e.as_ref().map(eval).transpose();

    let m = &compiled.motion;
    let doc = serde_json::json!({
        "t": args.t,
        "enable": eval(&m.enable)? != 0.0,
        "x": eval(&m.x)?,
        "y": eval(&m.y)?,
        "alpha": eval_opt(&m.alpha)?,
        "size": eval_opt(&compiled.size)?,
    });
    let text = serde_json::to_string_pretty(&doc).context("serialize sample")?;
    println!("{text}");
    Ok(())
}
