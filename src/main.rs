mod cli;

use baseline_rebase::adapters::outbound::console::StderrProgressReporter;
use baseline_rebase::adapters::outbound::filesystem::{FileSystemCatalog, FileSystemOverlayStore};
use baseline_rebase::application::dto::OutputFormat;
use baseline_rebase::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use baseline_rebase::application::use_cases::{CompareReleasesUseCase, RebaseOverlayUseCase};
use baseline_rebase::config::{self, ConfigFile};
use baseline_rebase::shared::error::{BaselineError, ExitCode};
use baseline_rebase::shared::Result;
use cli::{Args, Command, DiffArgs, RebaseArgs};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Settings after merging CLI flags over the config file
struct Settings {
    data_dir: PathBuf,
    format: Option<OutputFormat>,
    config: ConfigFile,
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(code.as_i32());
}

/// Filter used when `RUST_LOG` is unset or invalid
fn default_log_directive(verbose: bool) -> &'static str {
    if verbose {
        "baseline_rebase=debug,warn"
    } else {
        "baseline_rebase=warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let settings = load_settings(&args)?;
    validate_data_dir(&settings.data_dir)?;
    tracing::debug!(data_dir = %settings.data_dir.display(), "using data directory");

    match args.command {
        Command::Diff(diff) => run_diff(diff, &settings).await,
        Command::Rebase(rebase) => run_rebase(rebase, &settings).await,
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let config = match &args.config {
        Some(path) => config::load_config_from_path(path)?,
        None => {
            let search_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            config::discover_config(&search_dir)?.unwrap_or_default()
        }
    };

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let format = config
        .format
        .as_deref()
        .map(|f| f.parse::<OutputFormat>().map_err(anyhow::Error::msg))
        .transpose()?;

    Ok(Settings {
        data_dir,
        format,
        config,
        quiet: args.quiet,
    })
}

fn validate_data_dir(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| BaselineError::InvalidDataDir {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !metadata.is_dir() {
        return Err(BaselineError::InvalidDataDir {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }
    Ok(())
}

fn progress_reporter(quiet: bool) -> StderrProgressReporter {
    if quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    }
}

/// Colors only make sense for a table printed to a terminal
fn use_color(format: OutputFormat, output: &Option<PathBuf>) -> bool {
    format == OutputFormat::Table
        && output.is_none()
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal()
}

async fn run_diff(args: DiffArgs, settings: &Settings) -> Result<ExitCode> {
    let format = args.format.or(settings.format).unwrap_or_default();
    let formatter = FormatterFactory::create_diff(format, use_color(format, &args.output));

    let use_case = CompareReleasesUseCase::new(
        FileSystemCatalog::new(&settings.data_dir),
        progress_reporter(settings.quiet),
    );
    let diff = use_case.compare(&args.baseline, &args.target).await?;

    if !settings.quiet {
        eprintln!("{}", FormatterFactory::progress_message(format));
    }
    let output = formatter.format(&diff)?;
    PresenterFactory::create(PresenterType::from(args.output)).present(&output)?;

    Ok(ExitCode::Success)
}

async fn run_rebase(args: RebaseArgs, settings: &Settings) -> Result<ExitCode> {
    let format = args.format.or(settings.format).unwrap_or_default();
    let formatter = FormatterFactory::create_rebase(format, use_color(format, &args.output))?;

    let use_case = RebaseOverlayUseCase::new(
        FileSystemCatalog::new(&settings.data_dir),
        FileSystemOverlayStore::new(&settings.data_dir),
        progress_reporter(settings.quiet),
        settings.config.rebase_policy(),
    );

    let report = use_case
        .compute_rebase(&args.overlay, &args.baseline, &args.target)
        .await?;

    if !settings.quiet {
        eprintln!("{}", FormatterFactory::progress_message(format));
    }
    let output = formatter.format(&report)?;
    PresenterFactory::create(PresenterType::from(args.output)).present(&output)?;

    if !report.success {
        eprintln!(
            "❌ {}",
            report.error_message.as_deref().unwrap_or("Rebase could not be computed")
        );
        return Ok(ExitCode::ApplicationError);
    }

    if !args.apply {
        return Ok(ExitCode::Success);
    }

    if report.has_blocking_conflicts() {
        eprintln!(
            "Refusing to apply: {} blocking conflict(s)",
            report.blocking_conflict_count()
        );
        return Ok(ExitCode::BlockingConflicts);
    }

    let overlay = use_case.apply_rebase(&args.overlay, &report).await?;
    eprintln!("New overlay: {}", overlay.id);

    Ok(ExitCode::Success)
}
