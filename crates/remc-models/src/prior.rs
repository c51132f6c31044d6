use remc_core::{ErrorInfo, RemcError};

/// Independent Gaussian log prior with per-coordinate centers and widths.
pub(crate) fn gaussian_log_prior(
    param: &[f64],
    center: &[f64],
    width: &[f64],
) -> Result<f64, RemcError> {
    if param.len() != center.len() {
        return Err(RemcError::Model(
            ErrorInfo::new("prior-dimension", "parameter dimension does not match the prior")
                .with_context("expected", center.len().to_string())
                .with_context("actual", param.len().to_string()),
        ));
    }
    Ok(param
        .iter()
        .zip(center)
        .zip(width)
        .map(|((x, c), w)| -(x - c) * (x - c) / (2.0 * w * w))
        .sum())
}
