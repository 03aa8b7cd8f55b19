mod bootstrap;

use anyhow::Result;
use report_core::settings::Settings;
use report_output::pipeline;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;
    bootstrap::ensure_output_dir(&settings.out_dir)?;

    tracing::info!("ecom-report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Inputs: {} and {}; output: {}",
        settings.session_path().display(),
        settings.cart_path().display(),
        settings.out_dir.display()
    );

    let summary = pipeline::run(&settings)?;

    tracing::info!(
        "Done: {} session records and {} cart rows -> {} aggregate rows, {} report rows",
        summary.records_read,
        summary.cart_rows_read,
        summary.device_rows,
        summary.report_rows
    );
    for path in &summary.files_written {
        tracing::info!("Wrote {}", path.display());
    }

    Ok(())
}
