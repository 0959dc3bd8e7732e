//! End-to-end relay tests against the built binary

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

const PROVIDER_TOML: &str = r#"[provider]
api_key = "AIzaTestKey000000"
auth_domain = "demo-project.firebaseapp.com"
project_id = "demo-project"
storage_bucket = "demo-project.appspot.com"
messaging_sender_id = "1234"
app_id = "1:1234:web:abcd"

[relay]
notifier = "notify-send"
"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), PROVIDER_TOML).unwrap();
        std::fs::create_dir(dir.path().join("bin")).unwrap();
        std::fs::create_dir(dir.path().join("run")).unwrap();
        Self { dir }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn runtime_dir(&self) -> PathBuf {
        self.dir.path().join("run")
    }

    /// Command with an isolated runtime dir and a PATH without notify-send
    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_push-relay"));
        cmd.env("XDG_RUNTIME_DIR", self.runtime_dir())
            .env("PATH", self.dir.path().join("bin"))
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }
}

fn wait_for(path: &Path, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if path.exists() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

#[test]
fn stdin_relay_counts_each_payload() {
    let sandbox = Sandbox::new();
    let mut child = sandbox
        .command()
        .args(["--transport", "stdin"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn relay");

    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(
            stdin,
            r#"{{"notification":{{"title":"Order shipped","body":"Your package is on the way"}}}}"#
        )
        .unwrap();
        writeln!(stdin, r#"{{"data":{{"orderId":"42"}}}}"#).unwrap();
        writeln!(stdin, "not json").unwrap();
        writeln!(stdin).unwrap();
    }

    let output = child.wait_with_output().expect("Failed to wait for relay");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("Order shipped"), "stderr: {}", stderr);
    assert!(stderr.contains("orderId"), "stderr: {}", stderr);
    assert!(stderr.contains("malformed"), "stderr: {}", stderr);
    // notify-send is absent from PATH, so the one displayable payload fails
    assert!(
        stderr.contains("2 received, 0 displayed, 1 failed, 1 skipped"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn stdin_relay_releases_pid_file() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .command()
        .args(["--transport", "stdin"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run relay");

    assert!(output.status.success());
    let pid_file = sandbox.runtime_dir().join("push-relay-demo-project-1234.pid");
    assert!(!pid_file.exists());
}

#[test]
fn send_without_relay_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .command()
        .args(["send", "--title", "Hello"])
        .output()
        .expect("Failed to run send");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No relay listening for project 'demo-project'"),
        "stderr: {}",
        stderr
    );
}

#[cfg(unix)]
#[test]
fn send_reaches_socket_relay() {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let sandbox = Sandbox::new();
    let relay = sandbox
        .command()
        .args(["--transport", "socket"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn relay");

    let socket = sandbox.runtime_dir().join("push-relay-demo-project-1234.sock");
    assert!(wait_for(&socket, Duration::from_secs(10)), "relay socket never appeared");

    let send = sandbox
        .command()
        .args(["send", "--title", "Build finished", "--data", "job=7"])
        .output()
        .expect("Failed to run send");
    assert!(
        send.status.success(),
        "send stderr: {}",
        String::from_utf8_lossy(&send.stderr)
    );

    // Let the relay drain the payload before asking it to stop
    std::thread::sleep(Duration::from_millis(500));
    kill(Pid::from_raw(relay.id() as i32), Signal::SIGTERM).unwrap();

    let output = relay.wait_with_output().expect("Failed to wait for relay");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("Build finished"), "stderr: {}", stderr);
    assert!(stderr.contains("1 received"), "stderr: {}", stderr);
    assert!(!socket.exists());
}

#[cfg(unix)]
#[test]
fn second_relay_for_same_project_is_refused() {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let sandbox = Sandbox::new();
    let mut first = sandbox
        .command()
        .args(["--transport", "socket"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn relay");

    let socket = sandbox.runtime_dir().join("push-relay-demo-project-1234.sock");
    assert!(wait_for(&socket, Duration::from_secs(10)), "relay socket never appeared");

    let second = sandbox
        .command()
        .args(["--transport", "socket"])
        .output()
        .expect("Failed to run second relay");

    kill(Pid::from_raw(first.id() as i32), Signal::SIGTERM).unwrap();
    let _ = first.wait();

    assert_eq!(second.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already running"), "stderr: {}", stderr);
}
