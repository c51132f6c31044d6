use remc_core::{ProbabilityModel, RemcError};
use remc_engine::{ReplicaEngine, RunManifest, SnapshotPayload};
use tempfile::tempdir;

struct StdNormal;

impl ProbabilityModel for StdNormal {
    fn log_cond(&self, param: &[f64]) -> Result<f64, RemcError> {
        Ok(param.iter().map(|x| -0.5 * x * x).sum())
    }

    fn log_prior(&self, _param: &[f64]) -> Result<f64, RemcError> {
        Ok(0.0)
    }
}

fn sampled_engine() -> ReplicaEngine<StdNormal> {
    let mut engine = ReplicaEngine::new(
        StdNormal,
        vec!["x_0".into(), "x_1".into()],
        vec![1.0, 0.5],
        vec![vec![1.0, 1.0]; 2],
        5,
        vec![vec![0.0, 0.0]; 2],
        888,
    )
    .unwrap();
    engine.sample(21).unwrap();
    engine
}

#[test]
fn snapshot_round_trips_through_disk() {
    let engine = sampled_engine();
    let dir = tempdir().unwrap();
    // Nested directories are created on demand.
    let path = dir.path().join("runs").join("normal").join("snap.bin");

    let written = engine.save(&path, false).unwrap();
    assert_eq!(written, path);

    let restored = SnapshotPayload::load(&written).unwrap();
    assert_eq!(restored, engine.snapshot());
    assert_eq!(restored.samples.len(), 2);
    assert_eq!(restored.samples[0].len(), 21);
    assert_eq!(restored.samples[0][0].len(), 2);
    assert_eq!(restored.accept[1].len(), 21);
    assert_eq!(restored.exchange_accept.len(), 1);
    assert_eq!(restored.exchange_accept[0].len(), 21);
    assert_eq!(restored.betas, vec![1.0, 0.5]);
    assert_eq!(restored.exchange_step, 5);
}

#[test]
fn existing_files_are_never_overwritten() {
    let engine = sampled_engine();
    let dir = tempdir().unwrap();
    let path = dir.path().join("snap.bin");

    let first = engine.save(&path, false).unwrap();
    let second = engine.save(&path, false).unwrap();
    assert_eq!(first, path);
    assert_ne!(second, first);
    assert!(first.exists() && second.exists());

    let name = second.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("snap_"), "{name}");
    assert!(name.ends_with(".bin"), "{name}");

    // Both files decode to the same payload.
    assert_eq!(
        SnapshotPayload::load(&first).unwrap(),
        SnapshotPayload::load(&second).unwrap()
    );
}

#[test]
fn timestamp_flag_forces_a_suffix_on_a_fresh_path() {
    let engine = sampled_engine();
    let dir = tempdir().unwrap();
    let path = dir.path().join("snap.bin");

    let written = engine.save(&path, true).unwrap();
    assert_ne!(written, path);
    assert!(!path.exists());
    assert!(written.exists());
}

#[test]
fn manifest_describes_the_persisted_snapshot() {
    let engine = sampled_engine();
    let dir = tempdir().unwrap();
    let snapshot_path = engine.save(&dir.path().join("snap.bin"), false).unwrap();

    let manifest = engine
        .manifest(&snapshot_path, Some("roundtrip".into()))
        .unwrap();
    assert_eq!(manifest.snapshot_sha256.len(), 64);
    assert_eq!(manifest.snapshot_file.to_str(), Some("snap.bin"));
    assert_eq!(manifest.loop_count, engine.loop_count());
    assert_eq!(manifest.exchange_count, engine.exchange_count());
    assert_eq!(manifest.seed_label.as_deref(), Some("roundtrip"));

    let manifest_path = dir.path().join("manifest.json");
    manifest.write(&manifest_path).unwrap();
    let restored = RunManifest::load(&manifest_path).unwrap();
    assert_eq!(restored, manifest);
}
