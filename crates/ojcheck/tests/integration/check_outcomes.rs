use std::fs;

use ojcheck::{
    CompareError, Comparator, ComparatorConfig, FloatComparator, HarnessError, Outcome,
};

use super::{ECHO, Workspace, test_config};

#[tokio::test]
async fn test_echo_matches_expected() {
    let ws = Workspace::new();
    let source = ws.solution(ECHO);
    ws.case(0, "5\n", Some("5\n"));

    let verdict = ws
        .harness(&test_config())
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");

    assert_eq!(verdict.outcome(), Outcome::Ok);
    assert_eq!(verdict.total, 1);
    assert_eq!(verdict.mismatches, 0);
}

#[tokio::test]
async fn test_echo_wrong_answer() {
    let ws = Workspace::new();
    let source = ws.solution(ECHO);
    ws.case(0, "5\n", Some("6\n"));

    let verdict = ws
        .harness(&test_config())
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");

    assert_eq!(verdict.outcome(), Outcome::WrongAnswer);
    assert_eq!(verdict.total, 1);
    assert_eq!(verdict.mismatches, 1);
}

#[tokio::test]
async fn test_wrong_answer_does_not_stop_later_cases() {
    let ws = Workspace::new();
    let source = ws.solution(ECHO);
    ws.case(0, "1\n", Some("9\n"));
    ws.case(1, "2\n", Some("2\n"));
    ws.case(2, "3\n", Some("3\n"));

    let verdict = ws
        .harness(&test_config())
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");

    assert_eq!(verdict.outcome(), Outcome::WrongAnswer);
    assert_eq!(verdict.total, 3);
    assert_eq!(verdict.mismatches, 1);
    assert!(verdict.summary().starts_with("WrongAnswer (1 WAs in 3 cases)"));
}

#[tokio::test]
async fn test_missing_expected_output_is_seeded() {
    let ws = Workspace::new();
    let source = ws.solution(ECHO);
    ws.case(0, "5\n", None);

    let verdict = ws
        .harness(&test_config())
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");

    let seeded = fs::read_to_string(ws.layout().output_path(0)).expect("output not seeded");
    assert_eq!(seeded, "5\n");
    assert_eq!(verdict.total, 1);
    assert_eq!(verdict.seeded, 1);
    assert_eq!(verdict.mismatches, 0);
    assert_eq!(verdict.outcome(), Outcome::Ok);
}

#[tokio::test]
async fn test_non_utf8_output_is_seeded_verbatim() {
    let ws = Workspace::new();
    let source = ws.solution("printf '\\377\\376\\n'");
    ws.case(0, "\n", None);

    let verdict = ws
        .harness(&test_config())
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");

    let seeded = fs::read(ws.layout().output_path(0)).expect("output not seeded");
    assert_eq!(seeded, vec![0xff, 0xfe, b'\n']);
    assert_eq!(verdict.seeded, 1);
    assert_eq!(verdict.outcome(), Outcome::Ok);
}

#[tokio::test]
async fn test_seeded_output_is_compared_on_next_run() {
    let ws = Workspace::new();
    ws.case(0, "5\n", None);
    let harness = ws.harness(&test_config());

    let source = ws.solution(ECHO);
    harness
        .check(&ws.judge(), &source)
        .await
        .expect("first check failed");

    let source = ws.solution("read x\necho $((x + 1))");
    let verdict = harness
        .check(&ws.judge(), &source)
        .await
        .expect("second check failed");
    assert_eq!(verdict.seeded, 0);
    assert_eq!(verdict.mismatches, 1);
}

#[tokio::test]
async fn test_no_input_files() {
    let ws = Workspace::new();
    let source = ws.solution(ECHO);

    let verdict = ws
        .harness(&test_config())
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");

    assert_eq!(verdict.outcome(), Outcome::NoInputFiles);
    assert_eq!(verdict.total, 0);
    assert_eq!(verdict.summary(), "No input files...");
}

#[tokio::test]
async fn test_runtime_error_is_fatal() {
    let ws = Workspace::new();
    let source = ws.solution("exit 1");
    ws.case(0, "5\n", Some("5\n"));

    let err = ws
        .harness(&test_config())
        .check(&ws.judge(), &source)
        .await
        .expect_err("check should fail");

    match err {
        HarnessError::Runtime {
            case, exit_code, ..
        } => {
            assert_eq!(case, 0);
            assert_eq!(exit_code, Some(1));
        }
        other => panic!("expected Runtime error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_runtime_error_skips_remaining_cases() {
    let ws = Workspace::new();
    let source = ws.solution("read x\nif [ \"$x\" = boom ]; then exit 3; fi\necho \"$x\"");
    ws.case(0, "1\n", Some("1\n"));
    ws.case(1, "boom\n", Some("boom\n"));
    ws.case(2, "2\n", None);

    let err = ws
        .harness(&test_config())
        .check(&ws.judge(), &source)
        .await
        .expect_err("check should fail");

    assert!(matches!(
        err,
        HarnessError::Runtime {
            case: 1,
            exit_code: Some(3),
            ..
        }
    ));
    // case 2 would have been seeded had it run
    assert!(!ws.layout().output_path(2).exists());
}

#[tokio::test]
async fn test_floating_point_policy() {
    let ws = Workspace::new();
    let source = ws.solution("echo 1.005");
    ws.case(0, "\n", Some("1.0\n"));

    let mut config = test_config();
    config.comparator = ComparatorConfig::FloatingPoint { tolerance: 0.01 };
    let verdict = ws
        .harness(&config)
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");
    assert_eq!(verdict.outcome(), Outcome::Ok);

    let strict = ws
        .harness(&test_config())
        .with_comparator(Comparator::FloatingPoint(FloatComparator::new(0.001)))
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");
    assert_eq!(strict.outcome(), Outcome::WrongAnswer);
}

#[tokio::test]
async fn test_malformed_float_is_distinct_error() {
    let ws = Workspace::new();
    let source = ws.solution("echo nan-ish");
    ws.case(0, "\n", Some("1.0\n"));

    let mut config = test_config();
    config.comparator = ComparatorConfig::FloatingPoint { tolerance: 0.01 };
    let err = ws
        .harness(&config)
        .check(&ws.judge(), &source)
        .await
        .expect_err("check should fail");

    assert!(matches!(
        err,
        HarnessError::Compare(CompareError::InvalidFloat { line: 1, .. })
    ));
}

#[tokio::test]
async fn test_scratch_output_holds_last_case() {
    let ws = Workspace::new();
    let source = ws.solution(ECHO);
    ws.case(0, "first\n", Some("first\n"));
    ws.case(1, "second\n", Some("second\n"));

    let harness = ws.harness(&test_config());
    harness
        .check(&ws.judge(), &source)
        .await
        .expect("check failed");

    let scratch = fs::read_to_string(harness.scratch_output()).expect("no scratch output");
    assert_eq!(scratch, "second\n");
}
