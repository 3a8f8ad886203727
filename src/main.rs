use clap::{Parser, Subcommand};
use simple_blog::{config, output, render, resolve, scan, transform};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "simple-blog")]
#[command(about = "Static site generator for markdown blogs")]
#[command(long_about = "\
Static site generator for markdown blogs

Your filesystem is the data source. Markdown files become pages, front-matter
supplies titles and dates, and the directory layout decides the URL.

Content structure:

  content/
  ├── assets/                      # Static assets (favicon, fonts) → copied to output root
  ├── about.md                     # Static page → /about/
  ├── index.md                     # Optional custom home page → /
  └── blog/                        # Posts get the blog template and the index listing
      ├── hello-world/
      │   └── index.md             # → /blog/hello-world/
      └── trip-notes.mdx           # → /blog/trip-notes/ (MDX components pass through)

Every content file needs a front-matter block:

  ---
  title: \"Hello World\"
  date: \"2020-01-01\"
  description: \"Optional hand-written summary for the index listing\"
  ---

Malformed files are excluded and reported, never fatal. Run 'simple-blog check'
to turn any exclusion into a failing exit for CI, and 'simple-blog gen-config'
to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory (defaults to content_root from config.toml)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (document manifest)
    #[arg(long, default_value = ".simple-blog-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: scan → transform → resolve → render
    Build,
    /// Validate content; fails if any file would be excluded
    Check,
    /// Scan and transform content, writing the document manifest
    Scan,
    /// Remove the output and temp directories
    Clean,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(Path::new("."))?;
            let source = content_source(&cli, &config);

            println!("==> Stage 1: Scanning {}", source.display());
            let nodes = scan::scan(&source)?;
            output::print_scan_output(&nodes);

            println!("==> Stage 2: Transforming documents");
            let (documents, errors) = transform::Transformer::new(&config).transform_all(&nodes);
            output::print_transform_output(&documents, &errors);

            println!("==> Stage 3: Rendering HTML → {}", cli.output.display());
            let descriptors = resolve::resolve(&documents)?;
            output::print_page_output(&descriptors, &documents);
            render::render_site(&documents, &descriptors, &config, &source, &cli.output)?;

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let config = config::load_config(Path::new("."))?;
            let source = content_source(&cli, &config);

            println!("==> Checking {}", source.display());
            let nodes = scan::scan(&source)?;
            let (documents, errors) = transform::Transformer::new(&config).transform_all(&nodes);
            output::print_transform_output(&documents, &errors);
            resolve::resolve(&documents)?;

            if !errors.is_empty() {
                return Err(format!(
                    "{} of {} content files would be excluded",
                    errors.len(),
                    nodes.len()
                )
                .into());
            }
            println!("==> Content is valid");
        }
        Command::Scan => {
            let config = config::load_config(Path::new("."))?;
            let source = content_source(&cli, &config);

            let nodes = scan::scan(&source)?;
            output::print_scan_output(&nodes);
            let (documents, errors) = transform::Transformer::new(&config).transform_all(&nodes);
            for line in output::format_error_report(&errors) {
                eprintln!("{line}");
            }

            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&documents)?;
            std::fs::write(&manifest_path, json)?;
            println!("Wrote {}", manifest_path.display());
        }
        Command::Clean => {
            remove_dir_if_present(&cli.output)?;
            remove_dir_if_present(&cli.temp_dir)?;
            println!("==> Cleaned");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Content directory: the --source flag wins, then config.toml's content_root.
fn content_source(cli: &Cli, config: &config::SiteConfig) -> PathBuf {
    cli.source
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.content_root))
}

fn remove_dir_if_present(dir: &Path) -> std::io::Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
