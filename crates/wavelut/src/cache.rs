//! On-disk memoization of accuracy reports.
//!
//! Each report is stored as `<dir>/<function name>.json`. The file embeds the
//! function spec, format and modes it was computed for, so a stale entry is
//! recomputed instead of served. The cache holds no global state; callers
//! own its directory and lifetime.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::config::Mode;
use crate::error::{LutError, Result};
use crate::fixed::FixedPointFormat;
use crate::function::FunctionSpec;
use crate::sweep::{sweep, AccuracyReport};

/// Directory of cached [`AccuracyReport`]s keyed by function name.
#[derive(Debug, Clone)]
pub struct ReportCache {
    dir: PathBuf,
}

impl ReportCache {
    /// Uses `dir` as the cache root. Nothing is created until a store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache root.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the report for `name`.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Reads the cached report for `name` without recomputing.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::CacheMiss`] if no file exists, or an I/O or
    /// JSON error if it cannot be read.
    pub fn load(&self, name: &str) -> Result<AccuracyReport> {
        let path = self.path_for(name);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LutError::CacheMiss {
                    name: name.to_string(),
                    path,
                })
            }
            Err(e) => return Err(e.into()),
        };
        let report = serde_json::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), "loaded cached report");
        Ok(report)
    }

    /// Writes `report` under its function's name, replacing any previous entry.
    ///
    /// The report is written to a temporary file in the cache directory and
    /// renamed into place, so a failed write leaves the previous entry intact.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error if the file cannot be written.
    pub fn store(&self, report: &AccuracyReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&report.function().name);
        let tmp = NamedTempFile::new_in(&self.dir)?;
        let mut writer = BufWriter::new(tmp);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;
        let tmp = writer.into_inner().map_err(|e| e.into_error())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        info!(path = %path.display(), "stored report");
        Ok(path)
    }

    /// Returns the cached report when it matches these parameters, otherwise
    /// sweeps and stores a fresh one. `overwrite` forces recomputation.
    ///
    /// # Errors
    ///
    /// Propagates sweep errors and I/O or JSON errors from the cache file.
    pub fn load_or_compute(
        &self,
        function: &FunctionSpec,
        format: FixedPointFormat,
        modes: &[Mode],
        overwrite: bool,
    ) -> Result<AccuracyReport> {
        if !overwrite {
            match self.load(&function.name) {
                Ok(report) if report.matches(function, format, modes) => return Ok(report),
                Ok(_) => info!(function = %function.name, "cached report is stale"),
                Err(LutError::CacheMiss { .. }) => {}
                Err(LutError::Json(e)) => {
                    warn!(function = %function.name, error = %e, "cached report is unreadable");
                }
                Err(e) => return Err(e),
            }
        }
        let report = sweep(function, format, modes)?;
        self.store(&report)?;
        Ok(report)
    }

    /// [`load_or_compute`](Self::load_or_compute) for every function over its
    /// default domain at `precision`, one function per rayon task.
    ///
    /// Reports come back in the order of `functions`.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidFormat`] if a default domain is invalid,
    /// otherwise the first sweep or cache error.
    pub fn load_or_compute_all(
        &self,
        functions: &[FunctionSpec],
        precision: u32,
        modes: &[Mode],
        overwrite: bool,
    ) -> Result<Vec<AccuracyReport>> {
        functions
            .par_iter()
            .map(|f| self.load_or_compute(f, f.default_format(precision)?, modes, overwrite))
            .collect()
    }
}
