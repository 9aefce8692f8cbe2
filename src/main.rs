use clap::Parser;
use quire::{PipelineBuilder, PipelineError};
use quire_style::{FontChoice, MarginsInches, StyleError};
use std::path::{Path, PathBuf};

/// Export a markdown document as an APA-like or MLA-like PDF.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Markdown source file
    input: PathBuf,

    /// Output PDF path. Defaults to the input path with a .pdf extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON export configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Style profile: apa or mla
    #[arg(long)]
    style: Option<String>,

    /// Body font: serif, sans or monospace
    #[arg(long)]
    font: Option<FontChoice>,

    /// Top margin ("1in", "72pt", "2.5cm"; bare numbers are inches)
    #[arg(long, value_parser = parse_margin)]
    margin_top: Option<f32>,

    #[arg(long, value_parser = parse_margin)]
    margin_right: Option<f32>,

    #[arg(long, value_parser = parse_margin)]
    margin_bottom: Option<f32>,

    #[arg(long, value_parser = parse_margin)]
    margin_left: Option<f32>,

    /// Directory embedded images are resolved against. Defaults to the
    /// input file's directory.
    #[arg(long)]
    resources: Option<PathBuf>,

    /// Log pipeline decisions at debug level
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn parse_margin(value: &str) -> Result<f32, StyleError> {
    MarginsInches::parse_length(value)
}

fn builder_from_args(args: &Args) -> Result<PipelineBuilder, PipelineError> {
    let mut builder = PipelineBuilder::new();
    if let Some(path) = &args.config {
        builder = builder.with_config_file(path)?;
    }
    if let Some(style) = &args.style {
        builder = builder.with_style(style.clone());
    }
    if let Some(font) = args.font {
        builder = builder.with_font(font);
    }

    let mut margins = builder.config().margins;
    if let Some(top) = args.margin_top {
        margins.top = top;
    }
    if let Some(right) = args.margin_right {
        margins.right = right;
    }
    if let Some(bottom) = args.margin_bottom {
        margins.bottom = bottom;
    }
    if let Some(left) = args.margin_left {
        margins.left = left;
    }
    builder = builder.with_margins(margins);

    let resource_dir = match &args.resources {
        Some(dir) => dir.clone(),
        None => args
            .input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    Ok(builder.with_resource_dir(resource_dir))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), PipelineError> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("pdf"));

    let pipeline = builder_from_args(&args)?.build()?;
    pipeline.export_file(&args.input, &output).await?;

    println!("Wrote {}", output.display());
    Ok(())
}
