use serde_json::Value;
use std::process::Command;

fn run(args: &[&str]) -> (bool, Value) {
    let output = Command::new(env!("CARGO_BIN_EXE_recall"))
        .args(args)
        .env("RECALL_LOG", "off")
        .env_remove("RECALL_CONFIG")
        .output()
        .expect("failed to run recall");
    let stdout = String::from_utf8(output.stdout).unwrap();
    let reply = serde_json::from_str(stdout.trim()).unwrap_or_else(|e| {
        panic!("stdout is not one JSON document ({e}): {stdout:?}")
    });
    (output.status.success(), reply)
}

#[test]
fn test_negative_decay_rate_from_argv_is_an_error_document() {
    let (ok, reply) = run(&["SET_DECAY_RATE", "-0.5"]);
    assert!(ok);
    assert_eq!(reply["status"], "error");
    assert!(reply["message"].as_str().unwrap().contains("decay_rate"));
}

#[test]
fn test_negative_days_from_argv_is_an_error_document() {
    let (ok, reply) = run(&["SIMULATE_TIME", "-3"]);
    assert!(ok);
    assert_eq!(reply["status"], "error");
    assert!(reply["message"].as_str().unwrap().contains("-3"));
}

#[test]
fn test_one_shot_success_replies() {
    let (ok, reply) = run(&["SIMULATE_TIME", "2"]);
    assert!(ok);
    assert_eq!(reply["status"], "success");
    assert_eq!(reply["days"], 2);

    let (ok, stats) = run(&["--no-sample", "GET_STATS"]);
    assert!(ok);
    assert_eq!(stats["totalConcepts"], 0);
}
