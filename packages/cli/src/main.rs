#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for crime incident analytics.
//!
//! Loads a CSV export, derives the calendar and age-bracket fields, and
//! prints the answer to one analytical question (or all of them) as a text
//! table or JSON.

mod config;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use crime_stats_analytics::config::AnalysisConfig;
use crime_stats_analytics::questions;
use crime_stats_analytics_models::{MissingCategoryPolicy, Question};
use crime_stats_crime_models::DerivedIncident;
use serde::Serialize;

use crate::render::{TableRow, render_date_range, render_table};

#[derive(Parser)]
#[command(name = "crime_stats", about = "Crime incident analytics")]
struct Cli {
    /// CSV export with a header row
    input: PathBuf,
    /// Settings file (TOML). Defaults to the built-in parameters.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer every question (default)
    Report,
    /// Range of report years and totals per year
    DateRange,
    /// Crimes with the largest increase between two years
    Increase {
        #[command(flatten)]
        years: CompareArgs,
    },
    /// Crimes with the largest percentage increase between two years
    Percentage {
        #[command(flatten)]
        years: CompareArgs,
    },
    /// Top crimes per season of a year
    Seasons {
        /// Report year
        #[arg(long)]
        year: Option<i32>,
        /// Rows kept per season
        #[arg(long)]
        top: Option<u32>,
    },
    /// Top crimes per victim age bracket of a year
    AgeBrackets {
        /// Report year
        #[arg(long)]
        year: Option<i32>,
        /// Rows kept per bracket
        #[arg(long)]
        top: Option<u32>,
    },
    /// Top crimes per year over a range of years
    Years {
        /// First year, inclusive
        #[arg(long)]
        from: Option<i32>,
        /// Last year, inclusive
        #[arg(long)]
        to: Option<i32>,
        /// Rows kept per year
        #[arg(long)]
        top: Option<u32>,
    },
}

#[derive(clap::Args)]
struct CompareArgs {
    /// Earlier year
    #[arg(long)]
    base: Option<i32>,
    /// Later year
    #[arg(long)]
    target: Option<i32>,
    /// Drop crimes reported in only one of the two years
    #[arg(long)]
    exclude_missing: bool,
}

impl CompareArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(base) = self.base {
            config.comparison.base_year = base;
        }
        if let Some(target) = self.target {
            config.comparison.target_year = target;
        }
        if self.exclude_missing {
            config.comparison.missing_category = MissingCategoryPolicy::Exclude;
        }
    }
}

fn print_rows<T: TableRow + Serialize>(
    question: Question,
    rows: &[T],
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Table => {
            println!("== {} ==", question.title());
            println!("{}", render_table(rows));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
    }
    Ok(())
}

fn run_report(
    rows: &[DerivedIncident],
    config: &AnalysisConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = questions::run_report(rows, config)?;

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for question in Question::all() {
        match question {
            Question::DateRange => {
                println!("== {} ==", question.title());
                println!("{}", render_date_range(&report.date_range));
            }
            Question::Increase => print_rows(*question, &report.increase, format)?,
            Question::PercentageIncrease => {
                print_rows(*question, &report.percentage_increase, format)?;
            }
            Question::TopBySeason => print_rows(*question, &report.top_by_season, format)?,
            Question::TopByAgeBracket => {
                print_rows(*question, &report.top_by_age_bracket, format)?;
            }
            Question::TopByYear => print_rows(*question, &report.top_by_year, format)?,
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let settings = config::load_settings(cli.config.as_deref())?;
    let mut analysis = settings.analysis;

    let incidents = crime_stats_loader::load_incidents(&cli.input, &settings.columns)?;
    let rows = crime_stats_derivation::derive_incidents(&incidents)?;
    let format = cli.format;

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => run_report(&rows, &analysis, format)?,
        Commands::DateRange => {
            let result = questions::date_range(&rows);
            match format {
                OutputFormat::Table => {
                    println!("== {} ==", Question::DateRange.title());
                    println!("{}", render_date_range(&result));
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }
        Commands::Increase { years } => {
            years.apply(&mut analysis);
            analysis.validate()?;
            let cmp = analysis.comparison;
            let result = questions::increase_between(
                &rows,
                cmp.base_year,
                cmp.target_year,
                cmp.missing_category,
            )?;
            print_rows(Question::Increase, &result, format)?;
        }
        Commands::Percentage { years } => {
            years.apply(&mut analysis);
            analysis.validate()?;
            let cmp = analysis.comparison;
            let result = questions::percentage_increase_between(
                &rows,
                cmp.base_year,
                cmp.target_year,
                cmp.missing_category,
            )?;
            print_rows(Question::PercentageIncrease, &result, format)?;
        }
        Commands::Seasons { year, top } => {
            analysis.top_n = top.unwrap_or(analysis.top_n);
            analysis.validate()?;
            let year = year.unwrap_or(analysis.season_ranking.year);
            let result = questions::top_crimes_by_season(&rows, year, analysis.top_n);
            print_rows(Question::TopBySeason, &result, format)?;
        }
        Commands::AgeBrackets { year, top } => {
            analysis.top_n = top.unwrap_or(analysis.top_n);
            analysis.validate()?;
            let year = year.unwrap_or(analysis.age_ranking.year);
            let result = questions::top_crimes_by_age_bracket(&rows, year, analysis.top_n);
            print_rows(Question::TopByAgeBracket, &result, format)?;
        }
        Commands::Years { from, to, top } => {
            analysis.top_n = top.unwrap_or(analysis.top_n);
            if let Some(from) = from {
                analysis.year_ranking.from_year = from;
            }
            if let Some(to) = to {
                analysis.year_ranking.to_year = to;
            }
            analysis.validate()?;
            let range = analysis.year_ranking;
            let result =
                questions::top_crimes_by_year(&rows, range.from_year, range.to_year, analysis.top_n);
            print_rows(Question::TopByYear, &result, format)?;
        }
    }

    Ok(())
}
