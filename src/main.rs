use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pellegrino_esg::config::{self, Config};
use pellegrino_esg::dashboard::{build_view_with, DashboardError};
use pellegrino_esg::dataset::Dataset;
use pellegrino_esg::rating::aggregate;
use pellegrino_esg::{output, tui};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_NOT_FOUND: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive dashboard (default if no subcommand)
    Dashboard {
        /// Company selected on open (defaults to config, then the first company)
        #[arg(short = 'C', long)]
        company: Option<String>,
    },
    /// Print the total score and rating of every company
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print metrics and category scores for one company
    Show {
        /// Company name, as shown by `list`
        company: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Write a config file with every option spelled out
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "pellegrino-esg")]
#[command(about = "Pellegrino Scoring Tool - ESG ratings dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pellegrino-esg/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    pellegrino_esg::logging::init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Dashboard { company: None });
    let config_path = cli.config.map(PathBuf::from);

    // Init does not need an existing config
    if let Commands::Init { force } = command {
        let path = match config_path.map(Ok).unwrap_or_else(config::get_config_path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        match config::write_default_config(&path, force) {
            Ok(written) => {
                println!("Config written to {}", written.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let dataset = Dataset::reference();
    tracing::debug!(
        records = dataset.records().len(),
        companies = dataset.companies().len(),
        "dataset loaded"
    );

    // Validate config at startup
    if let Err(errors) = config::validate_config(&config, &dataset) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Captured before the dashboard takes ownership of the dataset
    let known_companies: Vec<String> =
        dataset.companies().into_iter().map(String::from).collect();

    let result = match command {
        Commands::Dashboard { company } => run_dashboard(dataset, &config, company).await,
        Commands::List { format } => run_list(&dataset, format),
        Commands::Show { company, format } => run_show(&dataset, &company, format),
        Commands::Init { .. } => Ok(()),
    };

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            if let Some(DashboardError::NotFound { company }) =
                e.downcast_ref::<DashboardError>()
            {
                eprintln!("{}", not_found_report(company, &known_companies));
                std::process::exit(EXIT_NOT_FOUND);
            }
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

/// Error text for an unknown company, listing the ones that exist
fn not_found_report(company: &str, known: &[String]) -> String {
    let mut lines = vec![format!("Unknown company '{}'. Known companies:", company)];
    lines.extend(known.iter().map(|name| format!("  - {}", name)));
    lines.join("\n")
}

async fn run_dashboard(
    dataset: Dataset,
    config: &Config,
    company: Option<String>,
) -> anyhow::Result<()> {
    let initial = company.or_else(|| config.default_company.clone());

    // Background detection talks to the terminal, so it must happen before raw mode
    let theme = tui::resolve_theme(config.theme);
    let colors = tui::ThemeColors::for_theme(theme, config.palette.as_ref());
    tracing::debug!(?theme, "theme resolved");

    let app = tui::App::new(dataset, initial.as_deref(), colors)?;
    tui::run_dashboard(app, config.tick_rate_ms).await
}

fn run_list(dataset: &Dataset, format: OutputFormat) -> anyhow::Result<()> {
    let ratings = aggregate(dataset.records());
    tracing::debug!(ratings = ratings.len(), "ratings computed");

    let rendered = match format {
        OutputFormat::Table => output::format_ratings_table(&ratings, output::should_use_colors()),
        OutputFormat::Tsv => output::format_tsv(&ratings),
        OutputFormat::Json => output::format_json(&ratings)?,
    };
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

fn run_show(dataset: &Dataset, company: &str, format: OutputFormat) -> anyhow::Result<()> {
    let ratings = aggregate(dataset.records());
    let view = build_view_with(dataset, &ratings, company)?;

    let rendered = match format {
        OutputFormat::Table => output::format_company_detail(&view, output::should_use_colors()),
        OutputFormat::Tsv => {
            let rating = ratings
                .iter()
                .filter(|r| r.company == company)
                .cloned()
                .collect::<Vec<_>>();
            output::format_tsv(&rating)
        }
        OutputFormat::Json => output::format_json(&view)?,
    };
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pellegrino_esg::dataset::{Category, ScoreRecord};

    #[test]
    fn test_not_found_report_lists_dataset_companies() {
        let dataset = Dataset::new(vec![
            ScoreRecord::new("Acme", Category::Environmental, 10.0),
            ScoreRecord::new("Globex", Category::Social, 20.0),
        ]);
        let known: Vec<String> = dataset.companies().into_iter().map(String::from).collect();

        let report = not_found_report("Tesla", &known);
        assert_eq!(
            report,
            "Unknown company 'Tesla'. Known companies:\n  - Acme\n  - Globex"
        );
        assert!(!report.contains("Apple"));
    }

    #[test]
    fn test_show_unknown_company_is_not_found() {
        let dataset = Dataset::reference();
        let err = run_show(&dataset, "Tesla", OutputFormat::Table).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::NotFound { company }) if company == "Tesla"
        ));
    }
}
