//! Receipt Viewer - inspect App Store receipts of application bundles
//!
//! The main entry point for rv-core, handling:
//! - Bundle validation and receipt decoding
//! - HTML report rendering and export
//! - Handing reports to the system viewer

use clap::{Args, Parser, Subcommand};
use rv_bundle::BundleInput;
use rv_core::config::{load_config, ConfigError, ConfigOptions, ResolvedConfig};
use rv_core::exit_codes::ExitCode;
use rv_core::export::{default_output_dir, export_report, OutputTarget};
use rv_core::logging::{init_logging, LogConfig, LogFormat};
use rv_core::output::OutputFormat;
use rv_core::registry::ReportRegistry;
use rv_core::viewer::{ReportViewer, SystemViewer};
use rv_receipt::ContainerDecoder;
use rv_report::{decode_bundle, ReportError, ReportGenerator};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Receipt Viewer - render App Store receipts as HTML reports
#[derive(Parser)]
#[command(name = "rv-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Report configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format on stderr
    #[arg(long, global = true, default_value = "human")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Render reports for one or more bundles, save them and open them
    Open(OpenArgs),

    /// Print the HTML report for a bundle to stdout
    Render(BundleArg),

    /// Print the decoded receipt of a bundle
    Inspect(BundleArg),

    /// Configuration management
    Config(ConfigArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct OpenArgs {
    /// Application bundles (paths or file:// URLs)
    #[arg(required = true)]
    bundles: Vec<String>,

    /// Directory for report files (default: downloads directory)
    #[arg(long, conflicts_with = "output")]
    output_dir: Option<PathBuf>,

    /// Report file path (single bundle only)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Write the report without opening it
    #[arg(long)]
    no_open: bool,
}

#[derive(Args, Debug)]
struct BundleArg {
    /// Application bundle (path or file:// URL)
    bundle: String,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved report configuration and where it came from
    Show,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_config = LogConfig::from_flags(cli.global.verbose, cli.global.quiet, cli.global.log_format);
    init_logging(&log_config);

    let exit_code = match &cli.command {
        Commands::Open(args) => run_open(&cli.global, args),
        Commands::Render(args) => run_render(&cli.global, args),
        Commands::Inspect(args) => run_inspect(&cli.global, args),
        Commands::Config(args) => match args.command {
            ConfigCommands::Show => run_config_show(&cli.global),
        },
        Commands::Version => print_version(&cli.global),
    };

    debug!(exit_code = %exit_code, "Exiting");
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn resolve_config(global: &GlobalOpts) -> Result<ResolvedConfig, ExitCode> {
    load_config(&ConfigOptions::from_env(global.config.clone())).map_err(|e| {
        eprintln!("Error: {}", e);
        match e {
            ConfigError::IoError { .. } => ExitCode::IoError,
            ConfigError::NotFound { .. } | ConfigError::Invalid { .. } => ExitCode::ArgsError,
        }
    })
}

fn report_failure(error: &ReportError) -> ExitCode {
    eprintln!("Error: {}", error);
    ExitCode::from_report_error(error)
}

#[derive(Serialize)]
struct OpenOutcome<'a> {
    input: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> OpenOutcome<'a> {
    fn failed(input: &'a str, error: impl ToString) -> Self {
        Self {
            input,
            status: "error",
            id: None,
            title: None,
            path: None,
            error: Some(error.to_string()),
        }
    }
}

fn run_open(global: &GlobalOpts, args: &OpenArgs) -> ExitCode {
    if args.output.is_some() && args.bundles.len() > 1 {
        eprintln!("Error: --output can only be used with a single bundle");
        return ExitCode::ArgsError;
    }

    let config = match resolve_config(global) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let generator = ReportGenerator::new(config.report);
    let decoder = ContainerDecoder::new();

    let target = match &args.output {
        Some(path) => OutputTarget::File(path.clone()),
        None => OutputTarget::Dir(args.output_dir.clone().unwrap_or_else(default_output_dir)),
    };
    let viewer = SystemViewer;

    let mut registry = ReportRegistry::new();
    let mut outcomes = Vec::with_capacity(args.bundles.len());
    let mut first_failure: Option<ExitCode> = None;

    for raw in &args.bundles {
        debug!(input = %raw, "Opening bundle");
        let exported = match export_report(&generator, &decoder, BundleInput::parse(raw), &target) {
            Ok(exported) => exported,
            Err(e) => {
                first_failure.get_or_insert(report_failure(&e));
                outcomes.push(OpenOutcome::failed(raw, &e));
                continue;
            }
        };

        let id = if args.no_open {
            None
        } else {
            let id = registry.register(&exported.title, &exported.path);
            if let Err(e) = viewer.show(&exported.path) {
                warn!(path = %exported.path.display(), error = %e, "Could not open report");
                registry.close(id);
                eprintln!("Error: could not open {}: {}", exported.path.display(), e);
                first_failure.get_or_insert(ExitCode::IoError);
                outcomes.push(OpenOutcome::failed(raw, e));
                continue;
            }
            Some(id)
        };

        outcomes.push(OpenOutcome {
            input: raw,
            status: "ok",
            id: id.map(|id| id.to_string()),
            title: Some(exported.title),
            path: Some(exported.path),
            error: None,
        });
    }

    let printed = match global.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "reports": outcomes,
            "open": registry.iter().collect::<Vec<_>>(),
        })),
        OutputFormat::Summary => {
            for outcome in &outcomes {
                match (&outcome.path, &outcome.error) {
                    (Some(path), _) => println!("{} -> {}", outcome.input, path.display()),
                    (None, Some(error)) => println!("{} failed: {}", outcome.input, error),
                    (None, None) => println!("{}", outcome.input),
                }
            }
            ExitCode::Clean
        }
    };

    first_failure.unwrap_or(printed)
}

fn run_render(global: &GlobalOpts, args: &BundleArg) -> ExitCode {
    let config = match resolve_config(global) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let generator = ReportGenerator::new(config.report);

    match generator.generate_from_bundle(BundleInput::parse(&args.bundle), &ContainerDecoder::new()) {
        Ok(report) => {
            println!("{}", report.html);
            ExitCode::Clean
        }
        Err(e) => report_failure(&e),
    }
}

fn run_inspect(global: &GlobalOpts, args: &BundleArg) -> ExitCode {
    let result = match decode_bundle(BundleInput::parse(&args.bundle), &ContainerDecoder::new()) {
        Ok(result) => result,
        Err(e) => return report_failure(&e),
    };

    match global.format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Summary => {
            let receipt = &result.receipt;
            let active = receipt.active_subscription_count(chrono::Utc::now());
            println!(
                "{} {} ({}): {} purchases, {} active subscriptions",
                receipt.bundle_identifier,
                receipt.app_version,
                result.bundle.bundle_path.display(),
                receipt.purchases.len(),
                active
            );
            ExitCode::Clean
        }
    }
}

/// Display the resolved report configuration (defaults if no file found).
fn run_config_show(global: &GlobalOpts) -> ExitCode {
    let config = match resolve_config(global) {
        Ok(config) => config,
        Err(code) => return code,
    };

    match global.format {
        OutputFormat::Json => print_json(&config),
        OutputFormat::Summary => {
            let path = config
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in defaults)".to_string());
            println!(
                "source: {:?} | path: {} | theme: {:?} | minify: {}",
                config.source, path, config.report.theme, config.report.minify
            );
            ExitCode::Clean
        }
    }
}

fn print_version(global: &GlobalOpts) -> ExitCode {
    let version_info = serde_json::json!({
        "rv_core_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });

    match global.format {
        OutputFormat::Json => print_json(&version_info),
        OutputFormat::Summary => {
            println!("rv-core {}", env!("CARGO_PKG_VERSION"));
            ExitCode::Clean
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::Clean
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::InternalError
        }
    }
}
