use std::process::Command;

fn tmin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tmin"))
}

#[test]
fn malformed_input_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mealy.csv");
    let output = dir.path().join("mealy_min.csv");
    std::fs::write(&input, ";p;q\na;q/0;p\n").unwrap();

    let out = tmin().arg("mealy").arg(&input).arg(&output).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.lines().any(|l| l.starts_with("error: ") && l.contains("line 2")),
        "unexpected stderr: {stderr}"
    );
    assert!(!output.exists());
}

#[test]
fn missing_input_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = tmin()
        .arg("moore")
        .arg(dir.path().join("absent.csv"))
        .arg(dir.path().join("out.csv"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: "));
}

#[test]
fn usage_errors_fail() {
    let out = tmin().args(["dfa", "in.csv", "out.csv"]).output().unwrap();
    assert!(!out.status.success());
    let out = tmin().arg("mealy").output().unwrap();
    assert!(!out.status.success());
}

#[test]
fn successful_runs_exit_with_status_zero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("moore.csv");
    let output = dir.path().join("moore_min.csv");
    std::fs::write(&input, ";0;0\n;p;q\na;q;p\n").unwrap();

    let out = tmin().arg("moore").arg(&input).arg(&output).output().unwrap();
    assert!(out.status.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), ";0\n;p\na;p\n");
}
