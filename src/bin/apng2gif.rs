use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "apng2gif", version, about = "Convert an animated PNG into a GIF")]
struct Cli {
    /// Path to the input APNG file.
    #[arg(long)]
    input: PathBuf,

    /// Path to the output GIF file.
    #[arg(long, default_value = "output.gif")]
    output: PathBuf,

    /// JSON options file; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum palette size per frame (1-256).
    #[arg(long)]
    colors: Option<u16>,

    /// Pixel-to-palette mapping.
    #[arg(long, value_enum)]
    drawer: Option<DrawerChoice>,

    /// Number of times the GIF repeats (0 loops forever).
    #[arg(long)]
    loop_count: Option<u16>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DrawerChoice {
    FloydSteinberg,
    Nearest,
}

impl From<DrawerChoice> for apng2gif::DrawerKind {
    fn from(choice: DrawerChoice) -> Self {
        match choice {
            DrawerChoice::FloydSteinberg => apng2gif::DrawerKind::FloydSteinberg,
            DrawerChoice::Nearest => apng2gif::DrawerKind::Nearest,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = resolve_opts(&cli)?;

    apng2gif::convert_file(&cli.input, &cli.output, &opts).with_context(|| {
        format!(
            "convert '{}' to '{}'",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    tracing::info!(output = %cli.output.display(), "conversion completed");
    Ok(())
}

fn resolve_opts(cli: &Cli) -> anyhow::Result<apng2gif::ConvertOpts> {
    let mut opts = match &cli.config {
        Some(path) => apng2gif::ConvertOpts::from_path(path)?,
        None => apng2gif::ConvertOpts::default(),
    };
    if let Some(colors) = cli.colors {
        opts.num_colors = colors;
    }
    if let Some(drawer) = cli.drawer {
        opts.drawer = drawer.into();
    }
    if cli.loop_count.is_some() {
        opts.loop_count = cli.loop_count;
    }
    Ok(opts)
}
