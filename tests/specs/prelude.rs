//! Shared fixture for end-to-end specs.
//!
//! Each spec gets an isolated runtime directory, so the managers spawned by
//! different specs never see each other. The fixture kills its manager on
//! drop by reading the pid from the startup marker in manager.log.

pub use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Poll `condition` until it holds or `max_ms` elapses.
pub fn wait_for(max_ms: u64, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(max_ms);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    condition()
}

pub struct Runtime {
    temp: TempDir,
    idle_ms: Option<u64>,
}

impl Runtime {
    pub fn new() -> Self {
        Self { temp: TempDir::new().expect("tempdir"), idle_ms: None }
    }

    /// Use a short idle window (the daemon reads it at startup).
    pub fn with_idle_ms(idle_ms: u64) -> Self {
        Self { temp: TempDir::new().expect("tempdir"), idle_ms: Some(idle_ms) }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    fn runtime_dir(&self) -> PathBuf {
        self.temp.path().join("runtime")
    }

    /// An `lspc` invocation wired to this fixture's runtime directory and
    /// the fake child server.
    pub fn lspc(&self) -> Command {
        let mut cmd = Command::cargo_bin("lspc").expect("lspc binary");
        cmd.env("LSPC_RUNTIME_DIR", self.runtime_dir())
            .env("LSPC_SERVER_BINARY", assert_cmd::cargo::cargo_bin("lspc-fake-server"))
            .env("LSPC_MANAGER_BINARY", assert_cmd::cargo::cargo_bin("lspcd"))
            .current_dir(self.temp.path())
            .timeout(Duration::from_secs(30));
        if let Some(idle_ms) = self.idle_ms {
            cmd.env("LSPC_IDLE_TIMEOUT_MS", idle_ms.to_string());
        }
        cmd
    }

    /// Create a python project fixture; returns the path of a source file
    /// inside it.
    pub fn python_project(&self) -> PathBuf {
        self.project_with_marker("py-proj", "pyproject.toml", "src/a.py")
    }

    pub fn go_project(&self) -> PathBuf {
        self.project_with_marker("go-proj", "go.mod", "main.go")
    }

    pub fn rust_project(&self) -> PathBuf {
        self.project_with_marker("rust-proj", "Cargo.toml", "src/main.rs")
    }

    fn project_with_marker(&self, name: &str, marker: &str, source: &str) -> PathBuf {
        let project = self.temp.path().join(name);
        let file = project.join(source);
        std::fs::create_dir_all(file.parent().expect("source parent")).expect("project dirs");
        std::fs::write(project.join(marker), "").expect("marker");
        std::fs::write(&file, "").expect("source file");
        file
    }

    pub fn manager_log(&self) -> String {
        std::fs::read_to_string(self.runtime_dir().join("logs/manager.log")).unwrap_or_default()
    }

    /// Pids of running fake servers, from the `<uds>.pid` files next to the
    /// client sockets.
    pub fn client_pids(&self) -> Vec<u32> {
        let clients = self.runtime_dir().join("clients");
        let Ok(entries) = std::fs::read_dir(&clients) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "pid"))
            .filter_map(|e| std::fs::read_to_string(e.path()).ok())
            .filter_map(|pid| pid.trim().parse().ok())
            .collect()
    }

    fn manager_pid(&self) -> Option<u32> {
        let log = self.manager_log();
        let marker = "--- lspcd: starting (pid: ";
        let start = log.rfind(marker)?;
        let rest = &log[start + marker.len()..];
        let end = rest.find(')')?;
        rest[..end].parse().ok()
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        // The manager idles indefinitely by design; don't leak it past the spec.
        if let Some(pid) = self.manager_pid() {
            let _ = std::process::Command::new("kill").arg(pid.to_string()).status();
        }
    }
}
