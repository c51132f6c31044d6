/// Marker recorded for an accepted coordinate proposal.
pub const ACCEPTED: i8 = 1;
/// Marker recorded for a rejected coordinate proposal.
pub const REJECTED: i8 = 0;
/// Marker for rows and rounds where no proposal was applicable.
pub const NOT_APPLICABLE: i8 = -1;

/// Append-only record of every sample, acceptance marker, and exchange
/// outcome produced by a run.
///
/// All per-chain series and all per-pair exchange series have the same
/// length at every instant; rows are only ever appended, never mutated.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    n_chains: usize,
    n_params: usize,
    samples: Vec<Vec<Vec<f64>>>,
    log_cond: Vec<Vec<f64>>,
    log_prior: Vec<Vec<f64>>,
    log_post: Vec<Vec<f64>>,
    accept: Vec<Vec<Vec<i8>>>,
    exchange: Vec<Vec<i8>>,
}

impl HistoryStore {
    pub(crate) fn new(n_chains: usize, n_params: usize) -> Self {
        let pairs = n_chains.saturating_sub(1);
        Self {
            n_chains,
            n_params,
            samples: vec![Vec::new(); n_chains],
            log_cond: vec![Vec::new(); n_chains],
            log_prior: vec![Vec::new(); n_chains],
            log_post: vec![Vec::new(); n_chains],
            accept: vec![Vec::new(); n_chains],
            exchange: vec![Vec::new(); pairs],
        }
    }

    /// Pre-sizes every series for `additional` further rows.
    pub(crate) fn reserve_rows(&mut self, additional: usize) {
        for k in 0..self.n_chains {
            self.samples[k].reserve(additional);
            self.log_cond[k].reserve(additional);
            self.log_prior[k].reserve(additional);
            self.log_post[k].reserve(additional);
            self.accept[k].reserve(additional);
        }
        for series in &mut self.exchange {
            series.reserve(additional);
        }
    }

    pub(crate) fn push_row(
        &mut self,
        k: usize,
        param: Vec<f64>,
        log_cond: f64,
        log_prior: f64,
        log_post: f64,
        accept: Vec<i8>,
    ) {
        debug_assert_eq!(param.len(), self.n_params);
        debug_assert_eq!(accept.len(), self.n_params);
        self.samples[k].push(param);
        self.log_cond[k].push(log_cond);
        self.log_prior[k].push(log_prior);
        self.log_post[k].push(log_post);
        self.accept[k].push(accept);
    }

    pub(crate) fn push_exchange(&mut self, pair: usize, outcome: i8) {
        debug_assert!((-1..=1).contains(&outcome));
        self.exchange[pair].push(outcome);
    }

    /// Number of chains.
    pub fn n_chains(&self) -> usize {
        self.n_chains
    }

    /// Number of sampled coordinates per chain.
    pub fn n_params(&self) -> usize {
        self.n_params
    }

    /// Number of rows recorded so far (identical for every chain).
    pub fn len(&self) -> usize {
        self.log_post.first().map_or(0, Vec::len)
    }

    /// Whether no rows have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample rows of chain `k`. Panics if `k` is out of range.
    pub fn samples(&self, k: usize) -> &[Vec<f64>] {
        &self.samples[k]
    }

    /// Log conditional series of chain `k`.
    pub fn log_cond_series(&self, k: usize) -> &[f64] {
        &self.log_cond[k]
    }

    /// Log prior series of chain `k`.
    pub fn log_prior_series(&self, k: usize) -> &[f64] {
        &self.log_prior[k]
    }

    /// Tempered log posterior series of chain `k`.
    pub fn log_post_series(&self, k: usize) -> &[f64] {
        &self.log_post[k]
    }

    /// Per-coordinate acceptance markers of chain `k`.
    pub fn accept_markers(&self, k: usize) -> &[Vec<i8>] {
        &self.accept[k]
    }

    /// Exchange outcomes for the adjacent pair starting at chain `pair`.
    pub fn exchange_outcomes(&self, pair: usize) -> &[i8] {
        &self.exchange[pair]
    }

    /// Fraction of applicable coordinate proposals chain `k` accepted.
    pub fn acceptance_rate(&self, k: usize) -> f64 {
        let mut accepted = 0usize;
        let mut proposed = 0usize;
        for row in &self.accept[k] {
            for &marker in row {
                if marker >= 0 {
                    proposed += 1;
                    accepted += (marker == ACCEPTED) as usize;
                }
            }
        }
        if proposed == 0 {
            0.0
        } else {
            accepted as f64 / proposed as f64
        }
    }

    /// Fraction of attempted swaps the pair starting at chain `pair` accepted.
    pub fn exchange_rate(&self, pair: usize) -> f64 {
        let attempted = self.exchange[pair].iter().filter(|&&m| m >= 0).count();
        if attempted == 0 {
            return 0.0;
        }
        let accepted = self.exchange[pair].iter().filter(|&&m| m == ACCEPTED).count();
        accepted as f64 / attempted as f64
    }

    /// Whether every series holds the same number of rows.
    pub fn is_aligned(&self) -> bool {
        let len = self.len();
        self.samples.iter().all(|s| s.len() == len)
            && self.log_cond.iter().all(|s| s.len() == len)
            && self.log_prior.iter().all(|s| s.len() == len)
            && self.log_post.iter().all(|s| s.len() == len)
            && self.accept.iter().all(|s| s.len() == len)
            && self.exchange.iter().all(|s| s.len() == len)
    }
}
