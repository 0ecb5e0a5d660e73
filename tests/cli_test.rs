use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn gazette_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gazette"));
    cmd.current_dir(dir.path())
        .env_remove("DATABASE")
        .env_remove("DATABASE_PASSWORD")
        .env_remove("HOST")
        .env_remove("PORT")
        .env_remove("MAX_PAGE_SIZE");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    let output = gazette_cmd(&tmp).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_config_uses_defaults_without_file() {
    let tmp = TempDir::new().unwrap();
    let output = gazette_cmd(&tmp).arg("config").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("articles.db"));
    assert!(stdout.contains("0.0.0.0:3000"));
    assert!(stdout.contains("unlimited"));
}

#[test]
fn test_config_reads_file_and_redacts_password() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("config.env"),
        concat!(
            "DATABASE=\"file:news.db?password=<PASSWORD>\"\n",
            "DATABASE_PASSWORD=hunter22\n",
            "PORT=8088\n",
            "MAX_PAGE_SIZE=25\n",
        ),
    )
    .unwrap();

    let output = gazette_cmd(&tmp).arg("config").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("file:news.db?password=*****"));
    assert!(!stdout.contains("hunter22"));
    assert!(stdout.contains(":8088"));
    assert!(stdout.contains("25"));
}

#[test]
fn test_explicit_config_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("staging.env");
    std::fs::write(&path, "PORT=9099\n").unwrap();

    let output = gazette_cmd(&tmp)
        .args(["config", "--config"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(":9099"));
}

#[test]
fn test_missing_password_fails_startup() {
    let tmp = TempDir::new().unwrap();
    let output = gazette_cmd(&tmp)
        .env("DATABASE", "file:news.db?password=<PASSWORD>")
        .args(["serve", "--port", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"));
    assert!(stderr.contains("DATABASE_PASSWORD"));
}

#[test]
fn test_invalid_port_fails_startup() {
    let tmp = TempDir::new().unwrap();
    let output = gazette_cmd(&tmp)
        .env("PORT", "eighty")
        .arg("serve")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid PORT"));
}

#[test]
fn test_flags_override_config_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.env"), "PORT=8088\n").unwrap();

    let output = gazette_cmd(&tmp)
        .args(["config", "--port", "7070", "--host", "127.0.0.1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("127.0.0.1:7070"));
}

#[test]
fn test_bare_invocation_starts_server() {
    let tmp = TempDir::new().unwrap();
    let mut child = gazette_cmd(&tmp)
        .env_remove("RUST_LOG")
        .args(["--host", "127.0.0.1", "--port", "0"])
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let stderr = child.stderr.take().unwrap();
    let started = BufReader::new(stderr)
        .lines()
        .map_while(|line| line.ok())
        .any(|line| line.contains("App running on 127.0.0.1:"));

    child.kill().unwrap();
    child.wait().unwrap();
    assert!(started, "server did not report its listen address");
}
