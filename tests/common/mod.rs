//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch directory the binary runs in.
pub struct TestFixture {
    pub dir: TempDir,
}

/// Result of one `ghmines` invocation.
#[derive(Debug)]
pub struct RunResult {
    pub success: bool,
    pub stderr: String,
}

impl TestFixture {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read(&self, rel: &str) -> anyhow::Result<String> {
        Ok(std::fs::read_to_string(self.path(rel))?)
    }

    /// Run the binary inside the fixture directory with a clean environment.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<RunResult> {
        let output = ghmines(self.dir.path())
            .args(args)
            .env_remove("GH_TOKEN")
            .env_remove("GITHUB_USER")
            .env_remove("RUST_LOG")
            .output()?;
        Ok(RunResult::from_output(output))
    }
}

impl RunResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

fn ghmines(cwd: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ghmines"));
    command.current_dir(cwd);
    command
}
