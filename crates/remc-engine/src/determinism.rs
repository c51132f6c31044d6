use remc_core::derive_substream_seed;

/// Derives the deterministic seed owned by a chain.
pub fn chain_seed(master_seed: u64, chain_index: usize) -> u64 {
    derive_substream_seed(master_seed, chain_index as u64)
}

/// Derives the deterministic seed for one Metropolis row of a chain.
///
/// Keyed by `(chain, row)` only, so the draws a chain sees do not depend on
/// how work is interleaved across chains within a batch.
pub fn row_seed(master_seed: u64, chain_index: usize, row_index: usize) -> u64 {
    derive_substream_seed(chain_seed(master_seed, chain_index), row_index as u64)
}

/// Derives the deterministic seed for an exchange round.
pub fn exchange_seed(master_seed: u64, round_index: usize) -> u64 {
    derive_substream_seed(master_seed ^ 0x5A5A_5A5A_5A5A_5A5A, round_index as u64)
}
