use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use digit_canvas_rs::image_pipeline::{
    CanonicalConfig, CanonicalVector, CanvasToVectorPipeline, Polarity, RecenterMode,
    canonical::CANVAS_SIDE,
};
use digit_canvas_rs::logger;

use tracing::info;

/// Canonicalize a hand-drawn digit into the 28x28 vector a classifier expects.
#[derive(Parser, Debug)]
#[command(name = "digit-canvas")]
#[command(about = "Turn a canvas drawing into a canonical 28x28 digit vector")]
struct Args {
    /// Image file, or a text file holding a `data:image/png;base64,...` URL
    input: PathBuf,

    /// How to print the vector on stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Grid)]
    format: OutputFormat,

    /// Also write the canonical grid as a PNG
    #[arg(short, long)]
    preview: Option<PathBuf>,

    /// Which intensity marks ink in the input
    #[arg(long, value_enum, default_value_t = PolarityArg::DarkOnLight)]
    polarity: PolarityArg,

    /// Drop pixels pushed off the frame when recentering instead of wrapping them
    #[arg(long)]
    clip: bool,

    /// Reject inputs wider or taller than this
    #[arg(long, default_value_t = 4096)]
    max_dimension: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// JSON array of 784 numbers
    Json,
    /// 28 rows of ASCII shading
    Grid,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolarityArg {
    DarkOnLight,
    LightOnDark,
    Auto,
}

impl From<PolarityArg> for Polarity {
    fn from(arg: PolarityArg) -> Self {
        match arg {
            PolarityArg::DarkOnLight => Polarity::DarkOnLight,
            PolarityArg::LightOnDark => Polarity::LightOnDark,
            PolarityArg::Auto => Polarity::Auto,
        }
    }
}

const SHADES: &[u8] = b" .:-=+*#%@";

fn render_grid(vector: &CanonicalVector) -> String {
    let mut out = String::with_capacity(((CANVAS_SIDE + 1) * CANVAS_SIDE) as usize);
    for row in vector.as_slice().chunks(CANVAS_SIDE as usize) {
        for &v in row {
            let idx = (v * (SHADES.len() - 1) as f32).round() as usize;
            out.push(SHADES[idx.min(SHADES.len() - 1)] as char);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    logger::init();

    let args = Args::parse();

    let config = CanonicalConfig::builder()
        .polarity(args.polarity.into())
        .recenter(if args.clip { RecenterMode::Clip } else { RecenterMode::Wrap })
        .max_dimension(Some(args.max_dimension))
        .build();
    let pipeline = CanvasToVectorPipeline::new(config);

    info!("Polarity: {:?}", pipeline.config().polarity);
    info!("Recentering: {:?}", pipeline.config().recenter);

    let vector = pipeline
        .convert_file(&args.input)
        .with_context(|| format!("failed to canonicalize {}", args.input.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(vector.as_slice())?),
        OutputFormat::Grid => print!("{}", render_grid(&vector)),
    }

    if let Some(preview) = &args.preview {
        pipeline
            .write_preview_file(&vector, preview)
            .with_context(|| format!("failed to write preview {}", preview.display()))?;
    }

    Ok(())
}
