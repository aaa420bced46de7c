use std::fs;
use std::os::unix::fs::PermissionsExt;

use ojcheck::{
    InterpreterSelection, Program, ProgramError, Toolchain, ToolchainOverride, ToolchainRegistry,
};

use super::{ECHO, Workspace, test_config};

#[tokio::test]
async fn test_execute_redirects_stdin_and_stdout() {
    let ws = Workspace::new();
    let source = ws.solution("while read line; do echo \"<$line>\"; done");
    let input = ws.path().join("in.txt");
    let output = ws.path().join("result.txt");
    fs::write(&input, "a\nb\n").expect("Failed to write input");

    let program = ToolchainRegistry::from_config(&test_config()).program(&source, ws.path());
    let result = program.execute(&input, &output).await.expect("execute failed");

    assert!(result.is_success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "<a>\n<b>\n");
}

#[tokio::test]
async fn test_execute_truncates_previous_output() {
    let ws = Workspace::new();
    let source = ws.solution(ECHO);
    let input = ws.path().join("in.txt");
    let output = ws.path().join("result.txt");
    fs::write(&input, "1\n").expect("Failed to write input");
    fs::write(&output, "stale contents that are much longer\n").expect("Failed to write output");

    let program = ToolchainRegistry::from_config(&test_config()).program(&source, ws.path());
    program.execute(&input, &output).await.expect("execute failed");

    assert_eq!(fs::read_to_string(&output).unwrap(), "1\n");
}

#[tokio::test]
async fn test_execute_reports_exit_code() {
    let ws = Workspace::new();
    let source = ws.solution("exit 7");
    let input = ws.path().join("in.txt");
    fs::write(&input, "").expect("Failed to write input");

    let program = ToolchainRegistry::from_config(&test_config()).program(&source, ws.path());
    let result = program
        .execute(&input, &ws.path().join("result.txt"))
        .await
        .expect("execute failed");

    assert!(!result.is_success());
    assert_eq!(result.exit_code, Some(7));
    assert!(result.signal.is_none());
}

#[tokio::test]
async fn test_execute_reports_signal() {
    let ws = Workspace::new();
    let source = ws.solution("kill -9 $$");
    let input = ws.path().join("in.txt");
    fs::write(&input, "").expect("Failed to write input");

    let program = ToolchainRegistry::from_config(&test_config()).program(&source, ws.path());
    let result = program
        .execute(&input, &ws.path().join("result.txt"))
        .await
        .expect("execute failed");

    assert!(result.exit_code.is_none());
    assert_eq!(result.signal, Some(9));
}

#[tokio::test]
async fn test_execute_measures_wall_time() {
    let ws = Workspace::new();
    let source = ws.solution("sleep 0.2");
    let input = ws.path().join("in.txt");
    fs::write(&input, "").expect("Failed to write input");

    let program = ToolchainRegistry::from_config(&test_config()).program(&source, ws.path());
    let result = program
        .execute(&input, &ws.path().join("result.txt"))
        .await
        .expect("execute failed");

    assert!(result.wall_time.as_secs_f64() >= 0.2);
}

#[tokio::test]
async fn test_execute_missing_input() {
    let ws = Workspace::new();
    let source = ws.solution(ECHO);

    let program = ToolchainRegistry::from_config(&test_config()).program(&source, ws.path());
    let err = program
        .execute(&ws.path().join("absent.txt"), &ws.path().join("result.txt"))
        .await
        .expect_err("execute should fail");

    assert!(matches!(err, ProgramError::OpenInput { .. }));
}

#[tokio::test]
async fn test_override_env_reaches_program() {
    let ws = Workspace::new();
    let source = ws.solution("echo \"$OJCHECK_TEST_VALUE\"");
    let input = ws.path().join("in.txt");
    let output = ws.path().join("result.txt");
    fs::write(&input, "").expect("Failed to write input");

    let mut overrides = ToolchainOverride {
        run: Some(vec!["/bin/sh".to_owned(), "{source}".to_owned()]),
        ..Default::default()
    };
    overrides
        .env
        .insert("OJCHECK_TEST_VALUE".to_owned(), "forty-two".to_owned());
    let program = Program::new(
        &source,
        ws.path(),
        Toolchain::Generic,
        InterpreterSelection::default(),
        Some(overrides),
    );
    program.execute(&input, &output).await.expect("execute failed");

    assert_eq!(fs::read_to_string(&output).unwrap(), "forty-two\n");
}

#[tokio::test]
async fn test_python_version_pin_is_exported() {
    let ws = Workspace::new();
    let source = ws.path().join("solution.py");
    fs::write(&source, "").expect("Failed to write source");
    let input = ws.path().join("in.txt");
    let output = ws.path().join("result.txt");
    fs::write(&input, "").expect("Failed to write input");

    let selection = InterpreterSelection {
        python_version: Some("3.11.4".to_owned()),
        ..Default::default()
    };
    let overrides = ToolchainOverride {
        run: Some(vec![
            "/bin/sh".to_owned(),
            "-c".to_owned(),
            "echo \"$PYENV_VERSION\"".to_owned(),
        ]),
        ..Default::default()
    };
    let toolchain = Toolchain::detect(Some("py"), &selection);
    let program = Program::new(&source, ws.path(), toolchain, selection, Some(overrides));
    program.execute(&input, &output).await.expect("execute failed");

    assert_eq!(fs::read_to_string(&output).unwrap(), "3.11.4\n");
}

#[tokio::test]
async fn test_generic_runs_source_directly() {
    let ws = Workspace::new();
    let source = ws.solution("echo direct");
    fs::set_permissions(&source, fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod solution");
    let input = ws.path().join("in.txt");
    let output = ws.path().join("result.txt");
    fs::write(&input, "").expect("Failed to write input");

    let program = ToolchainRegistry::default().program(&source, ws.path());
    assert!(program.compile_command().is_none());
    assert_eq!(program.execute_command(), vec![source.to_string_lossy().into_owned()]);

    let result = program.execute(&input, &output).await.expect("execute failed");
    assert!(result.is_success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "direct\n");
}
