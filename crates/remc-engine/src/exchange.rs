use remc_core::RngHandle;

use crate::chain::{self, ChainState};
use crate::history::{ACCEPTED, NOT_APPLICABLE, REJECTED};
use crate::metropolis;

/// Whether the adjacent pair starting at chain `pair` is tested during the
/// given exchange round.
///
/// Rounds alternate parity: even rounds test pairs starting at even indices,
/// odd rounds the rest, so any two consecutive rounds cover every adjacent
/// pair exactly once.
pub fn is_eligible(pair: usize, round: usize) -> bool {
    pair % 2 == round % 2
}

/// Metropolis acceptance probability for swapping the states of two adjacent
/// chains with the given current log conditionals.
pub fn swap_acceptance(
    log_cond_low: f64,
    beta_low: f64,
    log_cond_high: f64,
    beta_high: f64,
) -> f64 {
    let delta = (log_cond_high - log_cond_low) * (beta_low - beta_high);
    delta.min(0.0).exp()
}

/// Runs one exchange round over all eligible adjacent pairs, swapping states
/// in place and returning the per-pair outcome markers.
pub(crate) fn exchange_round(
    chains: &mut [ChainState],
    round: usize,
    rng: &mut RngHandle,
) -> Vec<i8> {
    let pair_count = chains.len().saturating_sub(1);
    let mut outcomes = vec![NOT_APPLICABLE; pair_count];
    for pair in 0..pair_count {
        if !is_eligible(pair, round) {
            continue;
        }
        let (head, tail) = chains.split_at_mut(pair + 1);
        let low = &mut head[pair];
        let high = &mut tail[0];
        // Cross energy before and after the hypothetical swap; priors ride
        // along with the vectors and drop out of the test.
        let pre = low.log_cond() * low.beta() + high.log_cond() * high.beta();
        let post = high.log_cond() * low.beta() + low.log_cond() * high.beta();
        if metropolis::accept_test(pre, post, rng) {
            chain::swap_states(low, high);
            outcomes[pair] = ACCEPTED;
        } else {
            outcomes[pair] = REJECTED;
        }
    }
    outcomes
}
