use std::path::{Path, PathBuf};

use remc_core::{ErrorInfo, ProbabilityModel, RemcError, RngHandle};

use crate::chain::ChainState;
use crate::config::{matrix_shape, SamplerConfig};
use crate::determinism;
use crate::exchange;
use crate::history::{HistoryStore, NOT_APPLICABLE};
use crate::manifest::RunManifest;
use crate::metropolis;
use crate::snapshot::SnapshotPayload;

/// Replica-exchange sampler over a caller-supplied probability model.
///
/// Owns the temperature ladder, one [`ChainState`] per rung, and the full
/// run history. The ladder is used exactly as supplied; exchange adjacency
/// is positional, and ordering it sensibly is the caller's contract.
#[derive(Debug)]
pub struct ReplicaEngine<M: ProbabilityModel> {
    model: M,
    param_names: Vec<String>,
    betas: Vec<f64>,
    exchange_step: usize,
    master_seed: u64,
    chains: Vec<ChainState>,
    history: HistoryStore,
    loop_count: usize,
    exchange_count: usize,
}

impl<M: ProbabilityModel> ReplicaEngine<M> {
    /// Builds an engine from validated inputs and seeds the history with one
    /// row per chain.
    ///
    /// Fails with a shape error if `init` or `step_widths` is not a K x J
    /// matrix, the ladder is empty, or `exchange_step` is zero; fails with
    /// an invalid-init error if any chain's initial log conditional or log
    /// prior is non-finite. Both are hard construction failures: the engine
    /// never recovers from a degenerate start.
    pub fn new(
        model: M,
        param_names: Vec<String>,
        betas: Vec<f64>,
        step_widths: Vec<Vec<f64>>,
        exchange_step: usize,
        init: Vec<Vec<f64>>,
        master_seed: u64,
    ) -> Result<Self, RemcError> {
        let n_params = param_names.len();
        let n_chains = betas.len();
        if n_chains == 0 {
            return Err(RemcError::Shape(ErrorInfo::new(
                "ladder-empty",
                "at least one inverse temperature is required",
            )));
        }
        if exchange_step == 0 {
            return Err(RemcError::Shape(ErrorInfo::new(
                "exchange-step",
                "exchange step must be at least 1",
            )));
        }
        check_matrix("init-shape", "initial parameters", &init, n_chains, n_params)?;
        check_matrix(
            "step-widths-shape",
            "step widths",
            &step_widths,
            n_chains,
            n_params,
        )?;

        let mut chains = Vec::with_capacity(n_chains);
        let mut history = HistoryStore::new(n_chains, n_params);
        for (k, (&beta, widths)) in betas.iter().zip(step_widths).enumerate() {
            let param = init[k].clone();
            let log_cond = model.log_cond(&param)?;
            let log_prior = model.log_prior(&param)?;
            check_finite("init-log-cond", "log conditional", k, log_cond)?;
            check_finite("init-log-prior", "log prior", k, log_prior)?;
            let chain = ChainState::new(beta, param, widths, log_cond, log_prior);
            history.push_row(
                k,
                chain.param().to_vec(),
                log_cond,
                log_prior,
                chain.log_post(),
                vec![NOT_APPLICABLE; n_params],
            );
            chains.push(chain);
        }
        for pair in 0..n_chains.saturating_sub(1) {
            history.push_exchange(pair, NOT_APPLICABLE);
        }

        Ok(Self {
            model,
            param_names,
            betas,
            exchange_step,
            master_seed,
            chains,
            history,
            loop_count: 1,
            exchange_count: 0,
        })
    }

    /// Builds an engine by resolving a [`SamplerConfig`]'s ladder, step
    /// width, and seed policies.
    pub fn from_config(
        model: M,
        config: &SamplerConfig,
        init: Vec<Vec<f64>>,
    ) -> Result<Self, RemcError> {
        let betas = config.ladder.build();
        let step_widths = config
            .step_widths
            .build(betas.len(), config.param_names.len())?;
        Self::new(
            model,
            config.param_names.clone(),
            betas,
            step_widths,
            config.exchange_step,
            init,
            config.seed_policy.master_seed,
        )
    }

    /// Samples until `loop_count` reaches `target_count`.
    pub fn sample(&mut self, target_count: usize) -> Result<(), RemcError> {
        self.sample_with_progress(target_count, 0)
    }

    /// Samples until `loop_count` reaches `target_count`, emitting roughly
    /// `progress_reports` tracing events along the way (0 disables them).
    ///
    /// Each driver iteration appends a batch of `exchange_step - 1`
    /// Metropolis rows per chain followed by exactly one exchange round; a
    /// started batch always completes, so the final count may overshoot the
    /// target by up to `exchange_step - 1`.
    pub fn sample_with_progress(
        &mut self,
        target_count: usize,
        progress_reports: usize,
    ) -> Result<(), RemcError> {
        if self.loop_count < target_count {
            self.history
                .reserve_rows(target_count - self.loop_count + self.exchange_step);
        }
        let interval =
            (progress_reports > 0).then(|| (target_count / progress_reports).max(1));
        let mut last_report = self.loop_count;
        while self.loop_count < target_count {
            self.run_batch(self.exchange_step - 1)?;
            self.run_exchange_round();
            if let Some(step) = interval {
                if self.loop_count >= last_report + step {
                    self.report_progress();
                    last_report = self.loop_count;
                }
            }
        }
        debug_assert!(self.history.is_aligned());
        Ok(())
    }

    /// Runs `batch` Metropolis rows for every chain, then advances the loop
    /// counter by the batch size.
    fn run_batch(&mut self, batch: usize) -> Result<(), RemcError> {
        for k in 0..self.chains.len() {
            for offset in 0..batch {
                let row = self.loop_count + offset;
                let mut rng =
                    RngHandle::from_seed(determinism::row_seed(self.master_seed, k, row));
                let markers = metropolis::sweep_row(&self.model, &mut self.chains[k], &mut rng)?;
                let chain = &self.chains[k];
                self.history.push_row(
                    k,
                    chain.param().to_vec(),
                    chain.log_cond(),
                    chain.log_prior(),
                    chain.log_post(),
                    markers,
                );
            }
        }
        for pair in 0..self.chains.len().saturating_sub(1) {
            for _ in 0..batch {
                self.history.push_exchange(pair, NOT_APPLICABLE);
            }
        }
        self.loop_count += batch;
        Ok(())
    }

    /// Runs one exchange round and appends its bookkeeping row to every
    /// chain, eligible or not, keeping all series aligned. With a single
    /// chain the round degenerates to the bookkeeping row alone.
    fn run_exchange_round(&mut self) {
        let mut rng = RngHandle::from_seed(determinism::exchange_seed(
            self.master_seed,
            self.exchange_count,
        ));
        let outcomes = exchange::exchange_round(&mut self.chains, self.exchange_count, &mut rng);
        let n_params = self.history.n_params();
        for (k, chain) in self.chains.iter().enumerate() {
            self.history.push_row(
                k,
                chain.param().to_vec(),
                chain.log_cond(),
                chain.log_prior(),
                chain.log_post(),
                vec![NOT_APPLICABLE; n_params],
            );
        }
        for (pair, outcome) in outcomes.into_iter().enumerate() {
            self.history.push_exchange(pair, outcome);
        }
        self.loop_count += 1;
        self.exchange_count += 1;
    }

    fn report_progress(&self) {
        let log_post: Vec<f64> = self.chains.iter().map(ChainState::log_post).collect();
        tracing::info!(
            loop_count = self.loop_count,
            exchange_count = self.exchange_count,
            log_post = ?log_post,
            "sampling progress"
        );
    }

    /// Names of the sampled parameters.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The inverse temperature ladder, in ladder order.
    pub fn betas(&self) -> &[f64] {
        &self.betas
    }

    /// Rows between exchange rounds.
    pub fn exchange_step(&self) -> usize {
        self.exchange_step
    }

    /// Current chain states, one per ladder slot.
    pub fn chains(&self) -> &[ChainState] {
        &self.chains
    }

    /// Full run history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Rows recorded so far, counting the seeded initial row.
    pub fn loop_count(&self) -> usize {
        self.loop_count
    }

    /// Exchange rounds executed so far.
    pub fn exchange_count(&self) -> usize {
        self.exchange_count
    }

    /// Captures the run as a serializable snapshot payload.
    pub fn snapshot(&self) -> SnapshotPayload {
        let n_chains = self.chains.len();
        SnapshotPayload {
            param_names: self.param_names.clone(),
            betas: self.betas.clone(),
            step_widths: self
                .chains
                .iter()
                .map(|chain| chain.step_width().to_vec())
                .collect(),
            exchange_step: self.exchange_step,
            accept: (0..n_chains)
                .map(|k| self.history.accept_markers(k).to_vec())
                .collect(),
            exchange_accept: (0..n_chains.saturating_sub(1))
                .map(|pair| self.history.exchange_outcomes(pair).to_vec())
                .collect(),
            samples: (0..n_chains)
                .map(|k| self.history.samples(k).to_vec())
                .collect(),
            log_cond: (0..n_chains)
                .map(|k| self.history.log_cond_series(k).to_vec())
                .collect(),
            log_prior: (0..n_chains)
                .map(|k| self.history.log_prior_series(k).to_vec())
                .collect(),
            log_post: (0..n_chains)
                .map(|k| self.history.log_post_series(k).to_vec())
                .collect(),
        }
    }

    /// Persists a snapshot of the run, returning the path actually written.
    pub fn save(&self, path: &Path, timestamp: bool) -> Result<PathBuf, RemcError> {
        self.snapshot().store(path, timestamp)
    }

    /// Builds a manifest describing a snapshot previously written by
    /// [`save`](Self::save).
    pub fn manifest(
        &self,
        snapshot_path: &Path,
        seed_label: Option<String>,
    ) -> Result<RunManifest, RemcError> {
        RunManifest::for_snapshot(
            self.param_names.clone(),
            self.betas.clone(),
            self.exchange_step,
            self.master_seed,
            seed_label,
            self.loop_count,
            self.exchange_count,
            snapshot_path,
        )
    }
}

fn check_matrix(
    code: &str,
    what: &str,
    rows: &[Vec<f64>],
    n_chains: usize,
    n_params: usize,
) -> Result<(), RemcError> {
    if rows.len() != n_chains || rows.iter().any(|row| row.len() != n_params) {
        return Err(RemcError::Shape(
            ErrorInfo::new(code, format!("{what} must form a K x J matrix"))
                .with_context("expected", format!("{n_chains}x{n_params}"))
                .with_context("actual", matrix_shape(rows)),
        ));
    }
    Ok(())
}

fn check_finite(code: &str, what: &str, chain: usize, value: f64) -> Result<(), RemcError> {
    if !value.is_finite() {
        return Err(RemcError::InvalidInit(
            ErrorInfo::new(code, format!("{what} is not finite at the initial point"))
                .with_context("chain", chain.to_string())
                .with_context("value", value.to_string()),
        ));
    }
    Ok(())
}
