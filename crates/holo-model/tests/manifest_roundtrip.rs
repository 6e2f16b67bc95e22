mod common;

use common::{ones_hologram, sphere_priors, FringeCalculator};
use holo_model::{HolographyModel, ModelKind, ObservationModel, TraceManifest};
use holo_ppl::ProbContext;

#[test]
fn manifest_round_trips_through_disk() {
    let model = HolographyModel::new(sphere_priors(), FringeCalculator::default());
    let record = model.convert_holopy(ones_hologram(5, 5));
    let mut ctx = ProbContext::for_substream(99, 0);
    model.call(&mut ctx, &record).unwrap();

    let manifest = TraceManifest::new(
        ModelKind::Holography,
        model.priors(),
        ctx.seed(),
        ctx.take_trace(),
    );
    assert_eq!(manifest.param_names.len(), 7);
    assert_eq!(manifest.provenance.prior_hash, model.priors().canonical_hash());
    assert!((manifest.log_joint - manifest.trace.log_joint()).abs() < 1e-12);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs/trace.json");
    manifest.write(&path).unwrap();
    let loaded = TraceManifest::load(&path).unwrap();

    assert_eq!(loaded.model_kind, ModelKind::Holography);
    assert_eq!(loaded.param_names, manifest.param_names);
    assert_eq!(loaded.provenance, manifest.provenance);
    assert_eq!(
        loaded.trace.names().collect::<Vec<_>>(),
        manifest.trace.names().collect::<Vec<_>>()
    );
}

#[test]
fn loading_garbage_is_a_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.json");
    std::fs::write(&path, "not json").unwrap();
    let err = TraceManifest::load(&path).unwrap_err();
    assert_eq!(err.info().code, "manifest-parse");
}

#[test]
fn io_failures_carry_code_and_path() {
    let model = HolographyModel::new(sphere_priors(), FringeCalculator::default());
    let manifest = TraceManifest::new(
        ModelKind::Holography,
        model.priors(),
        0,
        holo_ppl::Trace::new(),
    );
    let dir = tempfile::tempdir().unwrap();

    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();
    let err = manifest.write(&blocker.join("trace.json")).unwrap_err();
    assert!(matches!(err, holo_core::HoloError::Serde(_)));
    assert_eq!(err.info().code, "manifest-mkdir");
    assert_eq!(
        err.info().context.get("path").map(String::as_str),
        Some(blocker.display().to_string().as_str())
    );

    let absent = dir.path().join("absent.json");
    let err = TraceManifest::load(&absent).unwrap_err();
    assert_eq!(err.info().code, "manifest-read");
    assert_eq!(
        err.info().context.get("path").map(String::as_str),
        Some(absent.display().to_string().as_str())
    );
}
