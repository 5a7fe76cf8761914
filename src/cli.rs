use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::Settings;
use commands::{print_summary, serve};

#[derive(Parser)]
#[command(name = "sortdash")]
#[command(about = "Sorting operations dashboard: web server and terminal summary")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// CSV file with the daily sorting metrics
        #[arg(short, long, env = "SORTDASH_DATA_PATH")]
        data_path: Option<PathBuf>,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "SORTDASH_BIND_ADDRESS")]
        bind_address: Option<String>,

        /// Year stamped onto the month/day dates of the table
        #[arg(short, long, env = "SORTDASH_REPORT_YEAR")]
        report_year: Option<i32>,

        /// Keep the parsed table in memory for this many seconds (0 disables)
        #[arg(long, env = "SORTDASH_CACHE_TTL_SECS")]
        cache_ttl_secs: Option<u64>,
    },
    /// Print the KPI cards for the latest day in a range
    ///
    /// Examples:
    ///   sortdash summary
    ///   sortdash summary --lang en --start-date 2025-03-01 --end-date 2025-03-07
    Summary {
        /// CSV file with the daily sorting metrics
        #[arg(short, long, env = "SORTDASH_DATA_PATH")]
        data_path: Option<PathBuf>,

        /// Year stamped onto the month/day dates of the table
        #[arg(short, long, env = "SORTDASH_REPORT_YEAR")]
        report_year: Option<i32>,

        /// Output language (zh or en)
        #[arg(short, long)]
        lang: Option<String>,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long, requires = "end_date")]
        start_date: Option<NaiveDate>,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long, requires = "start_date")]
        end_date: Option<NaiveDate>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut settings = Settings::load()?;

        match self.command {
            Commands::Serve {
                data_path,
                bind_address,
                report_year,
                cache_ttl_secs,
            } => {
                if let Some(path) = data_path {
                    settings.data_path = path;
                }
                if let Some(address) = bind_address {
                    settings.bind_address = address;
                }
                if let Some(year) = report_year {
                    settings.report_year = year;
                }
                if let Some(ttl) = cache_ttl_secs {
                    settings.cache_ttl_secs = ttl;
                }
                serve(settings).await?;
            }
            Commands::Summary {
                data_path,
                report_year,
                lang,
                start_date,
                end_date,
            } => {
                if let Some(path) = data_path {
                    settings.data_path = path;
                }
                if let Some(year) = report_year {
                    settings.report_year = year;
                }
                print_summary(settings, lang.as_deref(), start_date, end_date)?;
            }
        }
        Ok(())
    }
}
