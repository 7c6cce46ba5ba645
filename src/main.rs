use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mealprep::console::ConsoleReviewer;
use mealprep_shared::parse_date;
use std::process::ExitCode;

/// mealprep - meal recommendations under house rules
#[derive(Parser)]
#[command(name = "mealprep")]
#[command(about = "Recommend meals for upcoming dates and keep a meal diary", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend meals interactively and save the accepted plan
    Recommend {
        /// Date to plan, repeatable (defaults to plan.dates)
        #[arg(long = "date", value_parser = parse_date)]
        dates: Vec<NaiveDate>,

        /// Seed for reproducible recommendations (overrides config file)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the meal diary around today
    Show {
        /// Entries before today (overrides config file)
        #[arg(long)]
        before: Option<usize>,

        /// Entries from today on (overrides config file)
        #[arg(long)]
        after: Option<usize>,
    },
    /// Record a meal on a date
    Add {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        meal: String,
    },
    /// Remove diary entries
    Remove {
        #[arg(value_parser = parse_date, required = true)]
        dates: Vec<NaiveDate>,
    },
    /// List the meal catalog
    Meals,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = mealprep::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealprep::observability::init_observability(&config.observability.log_level)?;

    let mut stdout = std::io::stdout();
    let result = match cli.command {
        Commands::Recommend { dates, seed } => {
            let mut reviewer = ConsoleReviewer::new(std::io::stdin().lock(), std::io::stdout());
            mealprep::cli::recommend::run(&config, dates, seed, &mut reviewer, &mut stdout)
        }
        Commands::Show { before, after } => {
            let today = chrono::Local::now().date_naive();
            mealprep::cli::diary::show(&config, today, before, after, &mut stdout)
        }
        Commands::Add { date, meal } => mealprep::cli::diary::add(&config, date, &meal),
        Commands::Remove { dates } => mealprep::cli::diary::remove(&config, &dates),
        Commands::Meals => mealprep::cli::meals::list(&config, &mut stdout),
    };

    match result {
        Err(err)
            if err
                .downcast_ref::<mealprep_shared::Error>()
                .is_some_and(mealprep_shared::Error::is_out_of_meals) =>
        {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
        other => other.map(|_| ExitCode::SUCCESS),
    }
}
