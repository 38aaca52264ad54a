use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Command with an empty config home so no user config leaks in.
fn newscheck(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("newscheck").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("CONFIDENCE_THRESHOLD")
        .env_remove("NEWSCHECK_LOG");
    cmd
}

fn decide_json(args: &[&str]) -> Value {
    let home = TempDir::new().unwrap();
    let output = newscheck(&home)
        .arg("decide")
        .args(args)
        .arg("--json")
        .output()
        .expect("failed to run newscheck");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("invalid json")
}

#[test]
fn fake_above_threshold() {
    let v = decide_json(&["--real", "0.1", "--fake", "0.9"]);
    assert_eq!(v["decision"], "fake");
    assert_eq!(v["confidence"], 0.9);
    assert_eq!(v["confidence_display"], "90.0%");
    assert_eq!(v["prob_real_display"], "0.1000");
    assert_eq!(v["prob_fake_display"], "0.9000");
    assert_eq!(v["threshold_display"], "80%");
}

#[test]
fn real_above_threshold() {
    let v = decide_json(&["--real", "0.85", "--fake", "0.15"]);
    assert_eq!(v["decision"], "real");
    assert_eq!(v["headline"], "Real News Detected");
    assert_eq!(v["guidance"]["recommendation_label"], "Note");
    assert!(v.get("completed_at").is_none());
}

#[test]
fn dominant_but_below_threshold() {
    let v = decide_json(&["--real", "0.7", "--fake", "0.3"]);
    assert_eq!(v["decision"], "uncertain");
    assert_eq!(v["guidance"]["title"], "Low Confidence Alert");
}

#[test]
fn tie_depends_on_threshold() {
    let v = decide_json(&["--real", "0.5", "--fake", "0.5"]);
    assert_eq!(v["decision"], "uncertain");

    let v = decide_json(&["--real", "0.5", "--fake", "0.5", "--threshold", "0.4"]);
    assert_eq!(v["decision"], "real");
    assert_eq!(v["threshold_display"], "40%");
}

#[test]
fn raw_output() {
    let home = TempDir::new().unwrap();
    newscheck(&home)
        .args(["decide", "--real", "0.1", "--fake", "0.9", "--raw"])
        .assert()
        .success()
        .stdout(
            "confidence = 90.0%\ndecision = fake\nprob_fake = 0.9000\nprob_real = 0.1000\nthreshold = 80%\n",
        );
}

#[test]
fn human_output_is_uncolored_when_piped() {
    let home = TempDir::new().unwrap();
    newscheck(&home)
        .args(["decide", "--real", "0.1", "--fake", "0.9"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("🚨 Fake News Detected"))
        .stdout(predicate::str::contains("تم اكتشاف خبر مزيف"))
        .stdout(predicate::str::contains("confidence = 90.0%"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn out_of_range_probabilities_fail_with_analysis_error() {
    let home = TempDir::new().unwrap();
    newscheck(&home)
        .args(["decide", "--real", "1.2", "--fake", "-0.2"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: invalid input: real probability 1.2 is not in [0, 1]",
        ));
}

#[test]
fn nan_probability_fails() {
    let home = TempDir::new().unwrap();
    newscheck(&home)
        .args(["decide", "--real", "NaN", "--fake", "0.5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn invalid_threshold_is_a_configuration_error() {
    for threshold in ["0", "1.5", "-0.3"] {
        let home = TempDir::new().unwrap();
        newscheck(&home)
            .args(["decide", "--real", "0.1", "--fake", "0.9", "--threshold", threshold])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("invalid configuration"));
    }
}

#[test]
fn json_and_raw_conflict() {
    let home = TempDir::new().unwrap();
    newscheck(&home)
        .args(["decide", "--real", "0.1", "--fake", "0.9", "--json", "--raw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_probability_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    newscheck(&home)
        .args(["decide", "--real", "0.1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--fake"));
}

#[test]
fn no_arguments_prints_help() {
    let home = TempDir::new().unwrap();
    newscheck(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: newscheck"));
}
