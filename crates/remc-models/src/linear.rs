use remc_core::{ErrorInfo, ProbabilityModel, RemcError};

/// Gaussian linear-regression likelihood over fixed data, with independent
/// Gaussian priors on the coefficients.
///
/// The sampled parameter vector holds the regression coefficients; noise and
/// prior scales are fixed at construction.
#[derive(Debug, Clone)]
pub struct LinearRegressionModel {
    design: Vec<Vec<f64>>,
    response: Vec<f64>,
    noise_sd: f64,
    prior_sd: f64,
}

impl LinearRegressionModel {
    /// Builds the likelihood from a design matrix (one row per observation)
    /// and its response vector.
    pub fn new(
        design: Vec<Vec<f64>>,
        response: Vec<f64>,
        noise_sd: f64,
        prior_sd: f64,
    ) -> Result<Self, RemcError> {
        if design.len() != response.len() {
            return Err(RemcError::Shape(
                ErrorInfo::new("regression-rows", "one response required per design row")
                    .with_context("rows", design.len().to_string())
                    .with_context("responses", response.len().to_string()),
            ));
        }
        let coeffs = design.first().map_or(0, Vec::len);
        if coeffs == 0 || design.iter().any(|row| row.len() != coeffs) {
            return Err(RemcError::Shape(ErrorInfo::new(
                "regression-design",
                "design rows must share one nonzero width",
            )));
        }
        if noise_sd <= 0.0 || prior_sd <= 0.0 {
            return Err(RemcError::Shape(
                ErrorInfo::new("regression-scales", "noise and prior scales must be positive")
                    .with_context("noise_sd", noise_sd.to_string())
                    .with_context("prior_sd", prior_sd.to_string()),
            ));
        }
        Ok(Self {
            design,
            response,
            noise_sd,
            prior_sd,
        })
    }

    /// Number of regression coefficients.
    pub fn n_coefficients(&self) -> usize {
        self.design.first().map_or(0, Vec::len)
    }
}

impl ProbabilityModel for LinearRegressionModel {
    fn log_cond(&self, param: &[f64]) -> Result<f64, RemcError> {
        if param.len() != self.n_coefficients() {
            return Err(RemcError::Model(
                ErrorInfo::new("regression-eval", "coefficient vector has the wrong dimension")
                    .with_context("expected", self.n_coefficients().to_string())
                    .with_context("actual", param.len().to_string()),
            ));
        }
        let var = self.noise_sd * self.noise_sd;
        Ok(self
            .design
            .iter()
            .zip(&self.response)
            .map(|(row, y)| {
                let fitted: f64 = row.iter().zip(param).map(|(x, b)| x * b).sum();
                -(y - fitted) * (y - fitted) / (2.0 * var)
            })
            .sum())
    }

    fn log_prior(&self, param: &[f64]) -> Result<f64, RemcError> {
        let var = self.prior_sd * self.prior_sd;
        Ok(param.iter().map(|b| -b * b / (2.0 * var)).sum())
    }
}
