//! Export per-point residuals to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Residual;
use crate::error::AppError;

/// Write per-point residuals to a CSV file.
pub fn write_residuals_csv(path: &Path, residuals: &[Residual]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_residuals(&mut file, residuals)?;
    log::info!("wrote {} residual rows to {}", residuals.len(), path.display());
    Ok(())
}

/// Write the CSV body to any writer.
pub fn write_residuals<W: Write>(out: &mut W, residuals: &[Residual]) -> Result<(), AppError> {
    writeln!(out, "x,y,fitted,residual")
        .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for r in residuals {
        writeln!(
            out,
            "{:.4},{:.4},{:.4},{:.4}",
            r.point.x, r.point.y, r.fitted, r.residual
        )
        .map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
