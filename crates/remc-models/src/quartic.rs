use remc_core::{ErrorInfo, ProbabilityModel, RemcError};

use crate::prior::gaussian_log_prior;

/// Multimodal benchmark target: a sum of tilted quartic double wells.
///
/// The log conditional is `-sum(x^4 - 16 x^2 + tilt * x) / 2` over the
/// coordinates, giving every coordinate two basins near `x = ±2.83` whose
/// depths differ with the tilt. Cold chains get stuck in one basin; a
/// tempered ladder walks between them.
#[derive(Debug, Clone)]
pub struct QuarticWellModel {
    tilt: f64,
    prior_center: Vec<f64>,
    prior_width: Vec<f64>,
}

impl QuarticWellModel {
    /// Benchmark defaults: tilt 0.2 and a broad `N(0, 10)` prior per
    /// coordinate.
    pub fn new(dim: usize) -> Self {
        Self {
            tilt: 0.2,
            prior_center: vec![0.0; dim],
            prior_width: vec![10.0; dim],
        }
    }

    /// Builds a model with an explicit tilt and prior profile.
    pub fn with_profile(
        tilt: f64,
        prior_center: Vec<f64>,
        prior_width: Vec<f64>,
    ) -> Result<Self, RemcError> {
        if prior_center.len() != prior_width.len() {
            return Err(RemcError::Shape(
                ErrorInfo::new("prior-profile", "prior centers and widths must align")
                    .with_context("centers", prior_center.len().to_string())
                    .with_context("widths", prior_width.len().to_string()),
            ));
        }
        Ok(Self {
            tilt,
            prior_center,
            prior_width,
        })
    }

    /// Sampled dimension.
    pub fn dim(&self) -> usize {
        self.prior_center.len()
    }
}

impl ProbabilityModel for QuarticWellModel {
    fn log_cond(&self, param: &[f64]) -> Result<f64, RemcError> {
        Ok(-param
            .iter()
            .map(|x| x.powi(4) - 16.0 * x * x + self.tilt * x)
            .sum::<f64>()
            / 2.0)
    }

    fn log_prior(&self, param: &[f64]) -> Result<f64, RemcError> {
        gaussian_log_prior(param, &self.prior_center, &self.prior_width)
    }
}
