// Shared helpers for integration tests.
//
// Provides fake adapters, a recording logger, and manifest fixtures so each
// integration test binary can exercise the driver and reporter without
// spawning real package managers.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use provision_cli::adapters::Adapter;
use provision_cli::logging::Log;
use provision_cli::manifest::PackageSpec;
use provision_cli::registry::Registry;

/// Logger that records every message instead of writing to the terminal.
#[derive(Debug, Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(level, message)` pairs recorded so far.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Whether any message at `level` contains `needle`.
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.messages()
            .iter()
            .any(|(l, m)| l == level && m.contains(needle))
    }

    fn record(&self, level: &str, msg: &str) {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((level.to_string(), msg.to_string()));
    }
}

impl Log for RecordingLog {
    fn error(&self, msg: &str) {
        self.record("error", msg);
    }
    fn warn(&self, msg: &str) {
        self.record("warn", msg);
    }
    fn stage(&self, msg: &str) {
        self.record("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.record("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.record("debug", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.record("dry_run", msg);
    }
}

/// Configurable fake adapter that records every install it performs.
#[derive(Debug)]
pub struct FakeAdapter {
    ecosystem: String,
    installed: Vec<String>,
    fail_install: Vec<String>,
    install_calls: AtomicUsize,
    check_calls: AtomicUsize,
    received: Mutex<Vec<PackageSpec>>,
}

impl FakeAdapter {
    pub fn new(ecosystem: &str) -> Self {
        Self {
            ecosystem: ecosystem.to_string(),
            installed: Vec::new(),
            fail_install: Vec::new(),
            install_calls: AtomicUsize::new(0),
            check_calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Mark these package names as already present on the fake host.
    #[must_use]
    pub fn with_installed(mut self, installed: &[&str]) -> Self {
        self.installed = installed.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Make installs of these package names fail.
    #[must_use]
    pub fn with_failing(mut self, failing: &[&str]) -> Self {
        self.fail_install = failing.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn install_call_count(&self) -> usize {
        self.install_calls.load(Ordering::SeqCst)
    }

    pub fn check_call_count(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    /// Specs handed to `install`, in call order.
    pub fn received_specs(&self) -> Vec<PackageSpec> {
        self.received
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Adapter for FakeAdapter {
    fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    fn check_installed(&self, spec: &PackageSpec) -> anyhow::Result<bool> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.installed.contains(&spec.name))
    }

    fn install(&self, spec: &PackageSpec) -> anyhow::Result<()> {
        self.install_calls.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(spec.clone());
        if self.fail_install.contains(&spec.name) {
            anyhow::bail!("simulated failure for '{}'", spec.name);
        }
        Ok(())
    }
}

/// Forwarding wrapper so a test can keep its own [`std::sync::Arc`] handle to
/// a [`FakeAdapter`] after registering it.
#[derive(Debug)]
pub struct SharedAdapter(pub std::sync::Arc<FakeAdapter>);

impl Adapter for SharedAdapter {
    fn ecosystem(&self) -> &str {
        self.0.ecosystem()
    }
    fn check_installed(&self, spec: &PackageSpec) -> anyhow::Result<bool> {
        self.0.check_installed(spec)
    }
    fn install(&self, spec: &PackageSpec) -> anyhow::Result<()> {
        self.0.install(spec)
    }
}

/// Build a registry from the given adapters.
pub fn registry_with(adapters: Vec<Box<dyn Adapter>>) -> Registry {
    let mut registry = Registry::new();
    for adapter in adapters {
        registry.register(adapter);
    }
    registry
}

/// Write `text` to `<dir>/manifest.toml` and return the path.
pub fn write_manifest(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("manifest.toml");
    std::fs::write(&path, text).expect("write manifest fixture");
    path
}
