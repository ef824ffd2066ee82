use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn playshare_cmd(fixture: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_playshare"));
    cmd.current_dir(Path::new("tests/fixtures").join(fixture));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn share_then_restore_round_trips() {
    let share = playshare_cmd("basic").args(["share", "hello.rb"]).output().unwrap();
    assert!(
        share.status.success(),
        "share failed: {}",
        String::from_utf8_lossy(&share.stderr)
    );
    let url = stdout_of(&share).trim().to_string();
    assert!(url.starts_with("https://example.com/#code="), "unexpected url {url}");

    let restore = playshare_cmd("basic").args(["restore", url.as_str()]).output().unwrap();
    assert!(
        restore.status.success(),
        "restore failed: {}",
        String::from_utf8_lossy(&restore.stderr)
    );
    let original = std::fs::read_to_string("tests/fixtures/basic/hello.rb").unwrap();
    assert_eq!(stdout_of(&restore), original);
}

#[test]
fn share_reads_stdin_and_honours_location_flag() {
    let mut cmd = playshare_cmd("basic");
    cmd.args(["share", "--location", "http://localhost:8000/?v=3.4#old"]);
    let output = run_with_stdin(cmd, "");
    assert!(output.status.success());

    let url = stdout_of(&output).trim().to_string();
    let fragment = url.strip_prefix("http://localhost:8000/?v=3.4#").unwrap();
    assert!(fragment.starts_with("code="));

    let restore = playshare_cmd("basic").args(["restore", fragment]).output().unwrap();
    assert!(restore.status.success());
    assert_eq!(stdout_of(&restore), "");
}

#[test]
fn share_rejects_location_without_scheme() {
    let output = playshare_cmd("basic")
        .args(["share", "hello.rb", "--location", "example.com"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid Location"));
}

#[test]
fn restore_of_garbage_exits_one() {
    let output = playshare_cmd("basic").args(["restore", "#code=not-valid-base64!!"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Nothing To Restore"));
}

#[test]
fn missing_input_file_exits_three() {
    let output = playshare_cmd("basic").args(["share", "absent.rb"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("File Not Found"));
}

#[test]
fn config_sets_language_location_and_embed() {
    let block = playshare_cmd("custom").args(["codeblock", "snippet.cr"]).output().unwrap();
    assert!(block.status.success());
    assert_eq!(stdout_of(&block), "```crystal\nputs [1, 2, 3].sum\n```\n");

    let embed = playshare_cmd("custom").args(["embed", "snippet.cr"]).output().unwrap();
    assert!(embed.status.success());
    let markup = stdout_of(&embed);
    assert!(markup.starts_with("<iframe src=\"https://play.example.org/app/embed.html#code="));
    assert!(markup.contains("height=\"600\""));
}

#[test]
fn explicit_config_flag_overrides_working_directory() {
    let output = playshare_cmd("basic")
        .args(["--config", "../custom/.playground.toml", "codeblock", "hello.rb"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("```crystal\n"));
}

#[test]
fn hover_prints_type_name() {
    let method = playshare_cmd("hover").args(["hover", "method.md"]).output().unwrap();
    assert!(method.status.success());
    assert_eq!(stdout_of(&method), "String\n");

    let fenced = playshare_cmd("hover").args(["hover", "--explain", "fenced.md"]).output().unwrap();
    assert!(fenced.status.success());
    assert_eq!(stdout_of(&fenced), "Hash\tfenced-block\n");
}

#[test]
fn hover_without_match_exits_one() {
    let output = playshare_cmd("hover").args(["hover", "plain.md"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn hover_reads_lsp_response_as_json() {
    let output = playshare_cmd("hover")
        .args(["hover", "--lsp", "--json", "lsp.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["type"], "Integer");
    assert_eq!(value["rule"], "fenced-block");
}

#[test]
fn hover_reads_stdin() {
    let mut cmd = playshare_cmd("hover");
    cmd.arg("hover");
    let output = run_with_stdin(cmd, ":foo?");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "Symbol\n");
}

#[test]
fn info_json_reports_state() {
    let output = playshare_cmd("custom").args(["info", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["current_state"]["config_found"], true);
    assert_eq!(value["current_state"]["language"], "crystal");
    assert_eq!(value["hover_rules"][0], "member-signature");
}

#[test]
fn info_reports_explicit_config_path() {
    let output = playshare_cmd("basic")
        .args(["--config", "../custom/.playground.toml", "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["current_state"]["config_found"], true);
    assert_eq!(value["current_state"]["config_path"], "../custom/.playground.toml");
    assert_eq!(value["current_state"]["language"], "crystal");
}

#[test]
fn info_without_config_file_reports_defaults() {
    let output = playshare_cmd("basic").args(["info", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["current_state"]["config_found"], false);
    assert_eq!(value["current_state"]["language"], "ruby");
}
