use clap::{Parser, Subcommand};
use photo_shelf::{compress, config, manifest, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photo-shelf")]
#[command(version)]
#[command(about = "Shrink oversized photos into an album tree and list them for a gallery")]
#[command(long_about = "\
Shrink oversized photos into an album tree and list them for a gallery

Two independent passes:

  compress   uncompressed_photos/ → albums/
             Images up to max_filesize_mb are copied byte-for-byte. Larger
             ones are re-encoded as JPEG with the long edge capped at
             max_dimension. Relative paths and file names are preserved.

  manifest   albums/ → gallery.js
             Writes `const allItems = [...];` with one {name, src, group}
             entry per image. Subdirectories become groups.

Settings come from photo-shelf.toml (see 'photo-shelf gen-config').")]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Log every file decision to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mirror the input tree, recompressing oversized images
    Compress {
        /// Input directory (overrides compress.input_dir)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output directory (overrides compress.output_dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write the gallery manifest script
    Manifest {
        /// Directory to list (overrides manifest.albums_dir)
        #[arg(long)]
        albums: Option<PathBuf>,
        /// Script file to write (overrides manifest.output_file)
        #[arg(long)]
        out_file: Option<PathBuf>,
    },
    /// Run compress, then manifest
    Run,
    /// Validate the config file and show the resolved settings
    Check,
    /// Print a stock photo-shelf.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compress { input, output } => {
            let mut config = config::load_config(&cli.config)?;
            if let Some(input) = input {
                config.compress.input_dir = input;
            }
            if let Some(output) = output {
                config.compress.output_dir = output;
            }
            run_compress(&config.compress)?;
        }
        Command::Manifest { albums, out_file } => {
            let mut config = config::load_config(&cli.config)?;
            if let Some(albums) = albums {
                config.manifest.albums_dir = albums;
            }
            if let Some(out_file) = out_file {
                config.manifest.output_file = out_file;
            }
            run_manifest(&config.manifest)?;
        }
        Command::Run => {
            let config = config::load_config(&cli.config)?;
            run_compress(&config.compress)?;
            run_manifest(&config.manifest)?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let config = config::load_config(&cli.config)?;
            output::print_config(&config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_compress(settings: &config::CompressConfig) -> Result<(), compress::CompressError> {
    println!(
        "==> Compressing {} \u{2192} {}",
        settings.input_dir.display(),
        settings.output_dir.display()
    );
    let summary = compress::compress(settings)?;
    output::print_compress_output(&summary);
    Ok(())
}

fn run_manifest(settings: &config::ManifestConfig) -> Result<(), manifest::ManifestError> {
    println!("==> Listing {}", settings.albums_dir.display());
    let summary = manifest::write_manifest(settings)?;
    output::print_manifest_output(&summary);
    Ok(())
}

/// Log level used when `RUST_LOG` is unset. Failed files are logged at
/// `warn` as they happen, so they stay visible if the run aborts later.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
