use std::io::Write;
use std::process::{Command, Stdio};

fn cantx() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cantx"));
    cmd.args(["--log-level", "error"]);
    cmd
}

#[test]
fn list_json_reports_the_full_signal_table() {
    let output = cantx()
        .args(["list", "--format", "json"])
        .output()
        .expect("list should run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    let rows: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    let rows = rows.as_array().expect("JSON array");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["signal"], "engine-rpm");
    assert_eq!(rows[0]["can_id"], "0CF004FE");
}

#[test]
fn encode_emits_the_reference_rpm_frame() {
    let output = cantx()
        .args(["encode", "engine-rpm", "1000", "--format", "json"])
        .output()
        .expect("encode should run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    let frame: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(frame["can_id"], "0CF004FE");
    assert_eq!(frame["extended"], true);
    assert_eq!(
        frame["data"],
        serde_json::json!([0, 0, 0, 0x40, 0x1F, 0, 0, 0])
    );
}

#[test]
fn encode_rejects_non_numeric_values() {
    let output = cantx()
        .args(["encode", "engine-rpm", "fast"])
        .output()
        .expect("encode should run");
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn encode_rejects_unknown_signals() {
    let output = cantx()
        .args(["encode", "warp-drive", "1"])
        .output()
        .expect("encode should run");
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn dry_run_with_duration_exits_clean() {
    let output = cantx()
        .args([
            "run",
            "--dry-run",
            "--all",
            "--cycle-ms",
            "10",
            "--duration-ms",
            "150",
        ])
        .output()
        .expect("run should run");
    assert!(output.status.success());
}

#[test]
fn interactive_commands_drive_channel_status() {
    let mut child = cantx()
        .args(["run", "--dry-run", "--cycle-ms", "10"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("run should start");

    {
        let stdin = child.stdin.as_mut().expect("stdin should be piped");
        stdin
            .write_all(b"start engine-rpm\nstatus\nstop engine-rpm\nquit\n")
            .expect("commands should be written");
    }

    let output = child.wait_with_output().expect("run should finish");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    assert!(stdout.contains("engine-rpm: Sending"));
    assert!(stdout.contains("engine-rpm: Idle"));
    assert!(stdout.contains("tractor-speed: Idle"));
}
