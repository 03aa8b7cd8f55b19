use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Month-over-month e-commerce metrics reporting
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ecom-report",
    about = "Month-over-month e-commerce metrics reporting",
    version
)]
pub struct Settings {
    /// Directory containing the input files (auto-detected if not specified)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Session-counts input file name
    #[arg(long, default_value = "DataAnalyst_Ecom_data_sessionCounts.csv")]
    pub session_file: String,

    /// Adds-to-cart input file name
    #[arg(long, default_value = "DataAnalyst_Ecom_data_addsToCart.csv")]
    pub cart_file: String,

    /// Output directory for the exported tables and chart series
    #[arg(long, default_value = "report-out")]
    pub out_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse settings from the process arguments.
    pub fn load() -> Self {
        Self::parse()
    }

    /// Resolve the input data directory.
    ///
    /// Uses `--data-dir` when given, otherwise the platform download
    /// directory (where analytics exports usually land), otherwise the home
    /// directory, otherwise the current directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Full path to the session-counts input file.
    pub fn session_path(&self) -> PathBuf {
        self.resolve_data_dir().join(&self.session_file)
    }

    /// Full path to the adds-to-cart input file.
    pub fn cart_path(&self) -> PathBuf {
        self.resolve_data_dir().join(&self.cart_file)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
