use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const STATUS_SCREEN: &str = "show interface status\r\n\
\r\n\
Port      Name               Status       Vlan       Duplex  Speed Type\r\n\
Te1/0/1   description        connected    trunk        full    10G SFP-10GBase-SR\r\n\
\r\n";

const ARP_SCREEN: &str = "show arp\n\
Protocol  Address          Age (min)  Hardware Addr   Type   Interface\n\
Internet  10.0.0.2                0   ffff.ffff.ffff  ARPA   Vlan1\n";

fn netscreen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_netscreen"))
}

fn write_screen(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("failed to write screen");
    path
}

fn run(args: &[&str]) -> Output {
    netscreen().args(args).output().expect("failed to run netscreen")
}

fn run_with_input(args: &[&str], input: &Path) -> Output {
    netscreen()
        .args(args)
        .arg("--input")
        .arg(input)
        .output()
        .expect("failed to run netscreen")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "netscreen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("Invalid JSON output: {e}\n{stdout}"))
}

// ---- parse ----

#[test]
fn test_parse_file_json_output() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, "status.txt", STATUS_SCREEN);

    let output = run_with_input(&["parse", "--command", "sh int status"], &screen);
    let parsed = stdout_json(&output);
    assert_eq!(parsed["Te1/0/1"]["Status"], "connected");
    assert_eq!(parsed["Te1/0/1"]["Type"], "SFP-10GBase-SR");
}

#[test]
fn test_parse_stdin() {
    let mut child = netscreen()
        .args(["parse", "--command", "show arp"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn netscreen");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(ARP_SCREEN.as_bytes())
        .expect("failed to write stdin");
    let output = child.wait_with_output().expect("failed to wait for netscreen");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["10.0.0.2"]["Interface"], "Vlan1");
}

#[test]
fn test_parse_table_output() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, "arp.txt", ARP_SCREEN);

    let output = run_with_input(&["parse", "--command", "show arp", "--format", "table"], &screen);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert!(lines.next().unwrap().starts_with("Protocol  Address"));
    assert!(lines.next().unwrap().contains("ffff.ffff.ffff"));
}

#[test]
fn test_parse_yaml_and_markdown_output() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, "arp.txt", ARP_SCREEN);

    let yaml = run_with_input(&["parse", "--command", "show arp", "--format", "yaml"], &screen);
    assert!(yaml.status.success());
    assert!(String::from_utf8_lossy(&yaml.stdout).contains("HardwareAddr: ffff.ffff.ffff"));

    let markdown =
        run_with_input(&["parse", "--command", "show arp", "--format", "markdown"], &screen);
    assert!(markdown.status.success());
    assert!(String::from_utf8_lossy(&markdown.stdout).starts_with("| Protocol | Address |"));
}

#[test]
fn test_parse_unknown_command_tokenizes() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, "version.txt", "Cisco IOS Software\nuptime is 5 weeks\n");

    let output = run_with_input(&["parse", "--command", "show version"], &screen);
    let parsed = stdout_json(&output);
    assert_eq!(parsed[0][0], "Cisco");
    assert_eq!(parsed[1].as_array().map(Vec::len), Some(4));
}

#[test]
fn test_parse_without_table_prints_null() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, "empty.txt", "");

    let output = run_with_input(&["parse", "--command", "show arp"], &screen);
    assert_eq!(stdout_json(&output), serde_json::Value::Null);
}

#[test]
fn test_parse_with_explicit_separator() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, "status.txt", STATUS_SCREEN);

    let output = run_with_input(
        &["parse", "--command", "show interface status", "--separator", "\r\n"],
        &screen,
    );
    let parsed = stdout_json(&output);
    assert_eq!(parsed["Te1/0/1"]["Vlan"], "trunk");
}

#[test]
fn test_parse_missing_file_fails() {
    let output = run(&["parse", "--command", "show arp", "--input", "/nonexistent/screen.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
}

// ---- batch ----

#[test]
fn test_batch_parses_every_file() {
    let dir = TempDir::new().unwrap();
    let first = write_screen(&dir, "a.txt", ARP_SCREEN);
    let second = write_screen(&dir, "b.txt", "");

    let output = netscreen()
        .args(["batch", "--command", "show arp", "--jobs", "2"])
        .arg(&first)
        .arg(&second)
        .output()
        .expect("failed to run netscreen");
    let parsed = stdout_json(&output);

    let first_key = first.display().to_string();
    let second_key = second.display().to_string();
    assert_eq!(parsed[first_key.as_str()]["10.0.0.2"]["Type"], "ARPA");
    assert!(parsed[second_key.as_str()].is_null());
}

#[test]
fn test_batch_requires_inputs() {
    let output = run(&["batch", "--command", "show arp"]);
    assert!(!output.status.success());
}

// ---- commands / tables ----

#[test]
fn test_commands_lists_shortest_forms() {
    let output = run(&["commands"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("VENDOR"));
    assert!(stdout.contains("show interface status"));
    assert!(stdout.contains("s int statu"));
    assert_eq!(stdout.lines().count(), 7);
}

#[test]
fn test_tables_json_dump() {
    let output = run(&["tables", "--format", "json"]);
    let parsed = stdout_json(&output);
    let tables = parsed.as_array().expect("tables must be an array");

    let arp = tables
        .iter()
        .find(|table| table["name"] == "show arp")
        .expect("show arp table");
    assert_eq!(arp["vendor"], "cisco");
    assert_eq!(arp["layout"]["mode"], "fixed");
    assert_eq!(arp["keys"], "Address");
}

#[test]
fn test_tables_rejects_table_format() {
    let output = run(&["tables", "--format", "table"]);
    assert!(!output.status.success());
}

#[test]
fn test_verbose_logs_dispatch_to_stderr() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, "arp.txt", ARP_SCREEN);

    let output = netscreen()
        .args(["--verbose", "parse", "--command", "sh ar", "--input"])
        .arg(&screen)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run netscreen");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cisco: show arp"));
}
