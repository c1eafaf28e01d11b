use airio_seo::check;
use airio_seo::config::{self, SiteConfig};
use airio_seo::context::SeoContext;
use airio_seo::i18n::FallbackPolicy;
use airio_seo::registry::search_terms;
use airio_seo::routes::{self, RouteKind};
use airio_seo::{emit, output, page};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let revision = env!("CONTENT_REVISION");
    if revision.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{} ({revision})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "airio-seo")]
#[command(about = "Programmatic SEO page generation for the Ai.Rio site")]
#[command(long_about = "\
Programmatic SEO page generation for the Ai.Rio site

Industries, comparisons and glossary terms are compiled into the binary.
Every (entity x locale) and (service x industry x locale) combination becomes
a page descriptor: localized metadata, hreflang alternates, and schema.org
JSON-LD.

Page paths:

  /{locale?}/compare/{slug}
  /{locale?}/glossary/{slug}
  /{locale?}/services/{service}/for-{industry}

English has no locale segment; es and pt do.

Output structure (build):

  dist/
  ├── routes.json
  ├── sitemap.xml
  ├── compare/lago/index.json      # Page descriptor
  ├── compare/lago/head.html       # Rendered <head> tags
  └── es/compare/lago/...

Run 'airio-seo gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Fail on missing translations instead of falling back
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every page the site serves
    Routes {
        /// Only list one kind: comparison, glossary or persona
        #[arg(long)]
        kind: Option<RouteKind>,
    },
    /// Print the descriptor for one page path
    Page {
        /// Site path, e.g. /es/compare/lago
        path: String,
        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write every page descriptor, head fragment and the sitemap
    Build {
        /// Rewrite every file, ignoring the build manifest
        #[arg(long)]
        no_cache: bool,
    },
    /// Validate content and string tables; non-zero exit on any issue
    Check,
    /// Search glossary terms by name, definition or description
    Search { query: String },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Routes { kind } => {
            let ctx = load_context(&cli.source, cli.strict)?;
            let routes = match kind {
                Some(kind) => routes::routes_of_kind(ctx.catalog, kind),
                None => routes::all_routes(ctx.catalog),
            };
            output::print_routes(&routes);
        }
        Command::Page { path, json } => {
            let ctx = load_context(&cli.source, cli.strict)?;
            match page::resolve_path(&ctx, &path) {
                Ok(descriptor) if json => {
                    println!("{}", serde_json::to_string_pretty(&descriptor)?);
                }
                Ok(descriptor) => output::print_page(&descriptor),
                Err(page::PageError::NotFound(path)) => {
                    eprintln!("Not found: {path}");
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Build { no_cache } => {
            let ctx = load_context(&cli.source, cli.strict)?;
            init_thread_pool(&ctx.config.processing);
            println!("==> Building pages \u{2192} {}", cli.output.display());
            let report = emit::build(&ctx, &cli.output, !no_cache)?;
            output::print_build(&report, &cli.output);
        }
        Command::Check => {
            let ctx = load_context(&cli.source, cli.strict)?;
            init_thread_pool(&ctx.config.processing);
            println!("==> Checking content");
            let report = check::check(&ctx);
            output::print_check(&report);
            if !report.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
            println!("==> Content is valid");
        }
        Command::Search { query } => {
            let terms = search_terms(&query);
            output::print_search(&query, &terms);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Config from `source`, with `--strict` forcing strict translation lookups.
fn load_context(source: &Path, strict: bool) -> Result<SeoContext, config::ConfigError> {
    let mut site_config: SiteConfig = config::load_config(source)?;
    if strict {
        site_config.translations.fallback = FallbackPolicy::Strict;
    }
    Ok(SeoContext::new(site_config))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
