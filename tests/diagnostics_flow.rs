// tests/diagnostics_flow.rs
//! End-to-end diagnostics flow: raise deep in a fake loader, wrap at
//! the API boundary, render the report, then re-raise the cause.

use vellum_diag::{render_to_string, Error, Location, Result};

fn tokenize(file: &str) -> Result<()> {
    Err(Error::tokenize(
        Location::new(file, 3, 7),
        "unexpected indent",
    ))
}

fn load(file: &str) -> Result<()> {
    tokenize(file).map_err(|cause| Error::api(format!("loading '{file}' failed")).with_cause(cause))
}

#[test]
fn wrap_render_and_rethrow() {
    let err = load("age/units.vlm").unwrap_err();
    assert_eq!(err.type_name(), "APIError");
    assert_eq!(err.msg(), "loading 'age/units.vlm' failed");

    let report = render_to_string(&err);
    let cause_at = report.find("age/units.vlm:3:7: unexpected indent").unwrap();
    let outer_at = report.find("APIError: loading 'age/units.vlm' failed").unwrap();
    assert!(cause_at < outer_at, "the root cause must render first");
    assert!(report.contains("The above error was the direct cause of the following error:"));

    let rethrown = err.into_cause().expect("wrapper must carry its cause");
    assert_eq!(rethrown.type_name(), "TokenizeError");
    assert!(rethrown.is_file_content());
    let location = rethrown.location().unwrap();
    assert_eq!((location.line, location.column), (3, 7));
}

#[test]
fn reason_diagnostics_keep_their_origin_lines() {
    let file = "age/units.vlm";
    let err = Error::reasons(
        Location::new(file, 9, 1),
        "conflicting member declarations",
        vec![
            (Location::new(file, 2, 1), "first declared here".into()),
            (Location::new(file, 9, 1), "declared again here".into()),
        ],
    );

    assert_eq!(
        err.to_string(),
        "age/units.vlm:9:1: conflicting member declarations"
    );
    assert_eq!(
        err.problem_origin().as_deref(),
        Some("age/units.vlm:2:1: first declared here\nage/units.vlm:9:1: declared again here")
    );
}

#[inline(never)]
fn failing_leaf() -> Result<()> {
    Err(Error::internal("leaf gave up"))
}

#[inline(never)]
fn middle() -> Result<()> {
    failing_leaf()
}

#[test]
fn wrapping_trims_the_cause_trace_down_to_the_divergence() {
    let leaf_err = middle().unwrap_err();
    let captured = leaf_err.backtrace().map_or(0, |bt| bt.len());

    let wrapped = Error::api("request failed").with_cause(leaf_err);
    let kept = wrapped.cause().unwrap().backtrace().map_or(0, |bt| bt.len());

    assert!(kept <= captured);
    if captured > 0 {
        assert!(kept < captured, "shared harness frames must be trimmed");
        assert!(kept > 0, "the frames unique to the raise site must survive");
    }
}
