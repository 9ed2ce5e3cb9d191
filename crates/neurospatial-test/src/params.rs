//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use neurospatial_core::LabelMap;
use std::fmt::Write as _;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values with expectations (default)
    #[default]
    Compare,
    /// Compare, and also dump intermediate maps to the regout directory
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check, the mode, and
/// every recorded failure. Checks never panic; call [`RegParams::cleanup`]
/// at the end and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "neighbor")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is read from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if values match within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two per-label count arrays element by element
    pub fn compare_counts(&mut self, expected: &[u32], actual: &[u32]) -> bool {
        self.index += 1;

        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: count comparison for index {}\n\
                 expected = {:?}\n\
                 actual   = {:?}",
                self.test_name, self.index, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two label maps for exact equality of shape and labels
    pub fn compare_maps(&mut self, map1: &LabelMap, map2: &LabelMap) -> bool {
        self.index += 1;

        if map1.dimensions() != map2.dimensions() {
            let msg = format!(
                "Failure in {}_reg: map comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        let width = map1.width();
        let height = map1.height();

        for y in 0..height {
            for x in 0..width {
                let p1 = map1.get_pixel(x, y);
                let p2 = map2.get_pixel(x, y);
                if p1 != p2 {
                    let msg = format!(
                        "Failure in {}_reg: map comparison for index {} - label mismatch at ({}, {}): {:?} vs {:?}",
                        self.test_name, self.index, x, y, p1, p2
                    );
                    self.record_failure(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Write a text rendering of `map` to the regout directory
    ///
    /// Only writes in display mode; returns the path written, if any.
    pub fn dump_map(&mut self, map: &LabelMap, tag: &str) -> TestResult<Option<String>> {
        if !self.display() {
            return Ok(None);
        }

        let dir = regout_dir();
        fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
            path: dir.clone(),
            message: e.to_string(),
        })?;

        let path = format!("{}/{}.{:02}.{}.txt", dir, self.test_name, self.index, tag);
        fs::write(&path, render_map(map))?;
        eprintln!("Wrote: {}", path);
        Ok(Some(path))
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Render a map as whitespace-separated rows of labels.
pub fn render_map(map: &LabelMap) -> String {
    let width = map.max_label().to_string().len();
    let mut out = String::new();
    for y in 0..map.height() {
        let row: Vec<String> = map
            .row_data(y)
            .iter()
            .map(|v| format!("{:>width$}", v, width = width))
            .collect();
        let _ = writeln!(out, "{}", row.join(" "));
    }
    out
}
