//! Library-level tests that drive a real subprocess renderer.

#![cfg(unix)]

mod common;

use common::{fake_renderer, invocations, Project};
use puml2svg::{render_stream, run_batch, BatchConfig, BatchError, ItemError, ItemStatus};

fn config_for(project: &Project, manifest: &[&str]) -> BatchConfig {
    let manifest_path = project.write_manifest("diagrams.txt", manifest);
    BatchConfig::builder()
        .renderer_path(fake_renderer())
        .manifest_path(manifest_path)
        .output_dir(project.path("svg-output"))
        .base_dir(project.dir.path())
        .build()
        .unwrap()
}

#[test]
fn mixed_manifest_renders_existing_files_in_order() {
    let project = Project::new(&["a.puml", "b.puml"]);
    let config = config_for(&project, &["a.puml", "missing.puml", "b.puml"]);

    let results = run_batch(&config).expect("batch should complete");

    let out = project.path("svg-output");
    assert_eq!(
        invocations(&out),
        vec![project.path("a.puml"), project.path("b.puml")]
    );
    assert!(out.join("a.svg").is_file());
    assert!(out.join("b.svg").is_file());

    let statuses: Vec<_> = results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![ItemStatus::Rendered, ItemStatus::Skipped, ItemStatus::Rendered]
    );
}

#[test]
fn nonzero_exit_is_reported_and_batch_continues() {
    let project = Project::new(&["broken.puml", "ok.puml"]);
    let config = config_for(&project, &["broken.puml", "ok.puml"]);

    let results = run_batch(&config).expect("tool failure must not be fatal");

    assert_eq!(invocations(&project.path("svg-output")).len(), 2);
    assert_eq!(results[0].status, ItemStatus::Failed);
    match &results[0].error {
        Some(ItemError::RendererFailed {
            path,
            exit_code,
            detail,
        }) => {
            assert_eq!(path, &project.path("broken.puml"));
            assert_eq!(*exit_code, Some(1));
            assert!(detail.contains("contains errors"), "got: {detail}");
        }
        other => panic!("expected RendererFailed, got {other:?}"),
    }
    assert!(results[1].is_rendered());
}

#[test]
fn single_failing_file_completes_without_error() {
    let project = Project::new(&["broken.puml"]);
    let config = config_for(&project, &["broken.puml"]);

    let results = run_batch(&config).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, ItemStatus::Failed);
}

#[test]
fn rerun_over_existing_output_dir_repeats_invocations() {
    let project = Project::new(&["a.puml", "b.puml"]);
    let config = config_for(&project, &["a.puml", "b.puml"]);

    run_batch(&config).unwrap();
    run_batch(&config).unwrap();

    let seen = invocations(&project.path("svg-output"));
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[..2], seen[2..]);
}

#[test]
fn relative_output_dir_is_shared_across_subdirectories() {
    let project = Project::new(&["one/a.puml", "two/b.puml"]);
    let manifest_path = project.write_manifest("diagrams.txt", &["one/a.puml", "two/b.puml"]);
    let config = BatchConfig::builder()
        .renderer_path(fake_renderer())
        .manifest_path(manifest_path)
        .output_dir("svg-output")
        .base_dir(project.dir.path())
        .build()
        .unwrap();

    run_batch(&config).unwrap();

    let out = project.path("svg-output");
    assert!(out.join("a.svg").is_file());
    assert!(out.join("b.svg").is_file());
    assert!(!project.path("one/svg-output").exists());
}

#[test]
fn stream_yields_items_lazily() {
    let project = Project::new(&["a.puml", "b.puml"]);
    let config = config_for(&project, &["a.puml", "b.puml"]);

    let mut stream = render_stream(&config).unwrap();
    assert_eq!(stream.total(), 2);
    assert!(stream.output_dir().is_dir());
    assert!(invocations(stream.output_dir()).is_empty());

    let first = stream.next().unwrap().unwrap();
    assert_eq!(first.line, 1);
    assert_eq!(invocations(&project.path("svg-output")).len(), 1);

    let rest: Vec<_> = stream.collect::<Result<_, _>>().unwrap();
    assert_eq!(rest.len(), 1);
}

#[test]
fn missing_renderer_is_fatal() {
    let project = Project::new(&["a.puml"]);
    let manifest_path = project.write_manifest("diagrams.txt", &["a.puml"]);
    let config = BatchConfig::builder()
        .renderer_path(project.path("no-such-renderer"))
        .manifest_path(manifest_path)
        .base_dir(project.dir.path())
        .build()
        .unwrap();

    let err = run_batch(&config).unwrap_err();
    assert!(
        matches!(err, BatchError::RendererLaunchFailed { .. }),
        "got: {err:?}"
    );
}

#[test]
fn missing_jar_is_a_per_item_failure_when_java_runs() {
    // `java_bin` stands in for a JVM that exits non-zero because the jar is absent.
    let project = Project::new(&["a.puml"]);
    let manifest_path = project.write_manifest("diagrams.txt", &["a.puml"]);
    let config = BatchConfig::builder()
        .renderer_path(project.path("absent.jar"))
        .java_bin("false")
        .manifest_path(manifest_path)
        .base_dir(project.dir.path())
        .build()
        .unwrap();

    let results = run_batch(&config).unwrap();
    assert_eq!(results[0].status, ItemStatus::Failed);
}
