#![cfg(unix)]

use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use tokio::process::Command;

use augur::errors::ToolError;
use augur::tools::ToolExecutor;

fn shell(script: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(script);
    command
}

#[tokio::test]
async fn test_captures_output_of_successful_tool() {
    let executor = ToolExecutor::new(Duration::from_secs(10));

    let output = executor
        .run("echo", shell("echo out; echo err >&2"))
        .await
        .unwrap();

    assert!(output.success());
    assert_eq!(output.exit_code, Some(0));
    assert_eq!(output.stdout, "out\n");
    assert_eq!(output.stderr, "err\n");
}

#[tokio::test]
async fn test_non_zero_exit_is_output_not_error() {
    let executor = ToolExecutor::new(Duration::from_secs(10));

    let output = executor
        .run("violations", shell("echo '12 pkg F a.go:1:1'; exit 3"))
        .await
        .unwrap();

    assert!(!output.success());
    assert_eq!(output.exit_code, Some(3));
    assert_eq!(output.stdout, "12 pkg F a.go:1:1\n");
}

#[tokio::test]
async fn test_missing_program_is_not_found() {
    let executor = ToolExecutor::new(Duration::from_secs(10));

    let result = executor
        .run("ghost", Command::new("augur-test-no-such-program"))
        .await;

    assert!(matches!(result, Err(ToolError::NotFound(name)) if name == "ghost"));
}

#[tokio::test]
async fn test_slow_tool_times_out() {
    let executor = ToolExecutor::new(Duration::from_secs(1));
    assert_eq!(executor.timeout(), Duration::from_secs(1));

    let start = Instant::now();
    let result = executor.run("sleeper", shell("sleep 10")).await;

    assert!(start.elapsed() < Duration::from_secs(5));
    match result {
        Err(err @ ToolError::Timeout { .. }) => {
            assert_eq!(err.to_string(), "Tool 'sleeper' timed out after 1s");
        }
        other => panic!("expected a timeout, got {:?}", other),
    }
}
