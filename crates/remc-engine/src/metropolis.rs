use remc_core::{ErrorInfo, ProbabilityModel, RemcError, RngHandle};

use crate::chain::ChainState;
use crate::history::{ACCEPTED, REJECTED};

/// Metropolis accept test on tempered log posteriors.
///
/// Short-circuits on `candidate >= current`, so `exp` only ever sees a
/// non-positive exponent and cannot overflow. A `NEG_INFINITY` candidate
/// loses the comparison and draws against an acceptance of zero.
pub fn accept_test(current: f64, candidate: f64, rng: &mut RngHandle) -> bool {
    candidate >= current || rng.uniform() <= (candidate - current).exp()
}

/// Runs one full-conditional coordinate sweep over a chain, returning the
/// per-coordinate acceptance markers for the resulting history row.
///
/// Coordinates are visited in order and updated sequentially: each proposal
/// perturbs one coordinate of the vector left by the previous accept, so up
/// to `J` coordinates may change within the row.
pub(crate) fn sweep_row<M: ProbabilityModel>(
    model: &M,
    chain: &mut ChainState,
    rng: &mut RngHandle,
) -> Result<Vec<i8>, RemcError> {
    let dim = chain.dim();
    let mut markers = vec![REJECTED; dim];
    for coordinate in 0..dim {
        let candidate = model.propose(chain.param(), chain.step_width(), coordinate, rng)?;
        if candidate.len() != dim {
            return Err(RemcError::Model(
                ErrorInfo::new("proposal-shape", "proposal changed the parameter dimension")
                    .with_context("expected", dim.to_string())
                    .with_context("actual", candidate.len().to_string()),
            ));
        }
        let log_cond = model.log_cond(&candidate)?;
        let log_prior = model.log_prior(&candidate)?;
        let log_post = log_cond * chain.beta() + log_prior;
        if accept_test(chain.log_post(), log_post, rng) {
            chain.replace(candidate, log_cond, log_prior, log_post);
            markers[coordinate] = ACCEPTED;
        }
    }
    Ok(markers)
}
