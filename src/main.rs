use clap::{Parser, Subcommand};
use justified_gallery::{arrange, config, output, scan};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that compute layouts.
#[derive(clap::Args, Clone)]
struct ArrangeArgs {
    /// Container width to lay out for (defaults to `layout.container_width`)
    #[arg(long, value_parser = parse_width)]
    width: Option<f64>,

    /// Print the rows as JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "justified-gallery")]
#[command(about = "Justified row layouts for photo galleries")]
#[command(long_about = "\
Justified row layouts for photo galleries

Every directory of photos becomes an album. Photos are ordered by numeric
prefix and split into rows that span the container width exactly, with row
heights kept near a target and photo counts per row kept even.

Content structure:

  content/
  ├── config.toml                  # Layout config (optional, cascades to children)
  ├── 010-Landscapes/              # Album
  │   ├── config.toml              # Per-album config (overrides parent)
  │   ├── 001-dawn.jpg
  │   └── 010-mountains.jpg        # Non-contiguous numbering OK
  └── 020-Travel/
      └── 010-Japan/               # Nested album
          └── 001-tokyo.jpg

Layouts are printed, never stored: run 'arrange' again for another width.
Set RUST_LOG=debug for diagnostics on stderr.

Run 'justified-gallery gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Directory for the intermediate photo list
    #[arg(long, default_value = ".justified-gallery-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a photo list
    Scan,
    /// Lay out every album of the last scan
    Arrange(ArrangeArgs),
    /// Run the full pipeline: scan → arrange
    Build(ArrangeArgs),
    /// Validate the content directory without laying anything out
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = run_scan(&cli.source, &cli.temp_dir)?;
            output::print_scan_output(&manifest);
        }
        Command::Arrange(args) => {
            let photos_path = cli.temp_dir.join("photos.json");
            let content = std::fs::read_to_string(&photos_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&content)?;
            init_thread_pool(&manifest.config.processing);
            emit_layouts(&manifest, &args)?;
        }
        Command::Build(args) => {
            eprintln!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = run_scan(&cli.source, &cli.temp_dir)?;
            if !args.json {
                output::print_scan_output(&manifest);
            }
            eprintln!("==> Stage 2: Arranging albums");
            emit_layouts(&manifest, &args)?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Scan `source` and write the photo list to `temp_dir/photos.json`.
fn run_scan(source: &Path, temp_dir: &Path) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    let root_config = config::load_config(source)?;
    init_thread_pool(&root_config.processing);
    let manifest = scan::scan(source)?;
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(temp_dir.join("photos.json"), json)?;
    Ok(manifest)
}

fn emit_layouts(
    manifest: &scan::Manifest,
    args: &ArrangeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let layouts = arrange::arrange(manifest, args.width);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&layouts)?);
    } else {
        output::print_arrange_output(&layouts);
    }
    Ok(())
}

/// `--width` parser: a positive, finite number.
fn parse_width(s: &str) -> Result<f64, String> {
    let width: f64 = s.parse().map_err(|e| format!("{e}"))?;
    config::check_container_width(width).map_err(|e| e.to_string())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: the user can constrain down, not up.
/// Only the first call takes effect.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
