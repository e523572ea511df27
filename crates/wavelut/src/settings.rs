//! Sweep settings, optionally loaded from TOML.
//!
//! ```
//! use wavelut::settings::SweepSettings;
//!
//! let s = SweepSettings::from_toml_str(r#"
//!     precision = 10
//!     modes = ["quant", "haar"]
//!
//!     [[functions]]
//!     name = "Sigmoid"
//!     activation = "sigmoid"
//!     shift = -16.0
//!     extra_bits = 5
//! "#).unwrap();
//! assert_eq!(s.precision, 10);
//! assert_eq!(s.functions.len(), 1);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::Mode;
use crate::error::{LutError, Result};
use crate::function::FunctionSpec;

/// Parameters of an accuracy sweep run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Fractional bits of every default domain. Default: **12**.
    pub precision: u32,
    /// Functions to sweep. Default: the nine-function catalog.
    pub functions: Vec<FunctionSpec>,
    /// Modes to compare. Default: quant, haar, bior2.2.
    #[serde(deserialize_with = "modes_from_names")]
    pub modes: Vec<Mode>,
    /// Report cache directory. Default: `data`.
    pub data_dir: PathBuf,
    /// Recompute even when a matching cached report exists.
    pub overwrite: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            precision: 12,
            functions: FunctionSpec::catalog(),
            modes: Mode::SWEPT.to_vec(),
            data_dir: PathBuf::from("data"),
            overwrite: false,
        }
    }
}

impl SweepSettings {
    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::Toml`] for malformed input or a configuration
    /// error from [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and validates a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Checks that the run is well-formed before any computation.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidConfig`] for a zero precision or an empty
    /// function or mode list, or [`LutError::InvalidFormat`] if a function's
    /// default domain is not a valid format.
    pub fn validate(&self) -> Result<()> {
        if self.precision == 0 {
            return Err(LutError::config("precision", "must be > 0"));
        }
        if self.functions.is_empty() {
            return Err(LutError::config("functions", "at least one function is required"));
        }
        if self.modes.is_empty() {
            return Err(LutError::config("modes", "at least one mode is required"));
        }
        for f in &self.functions {
            f.default_format(self.precision)?;
        }
        Ok(())
    }

    /// Keeps only the functions named in `names` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`LutError::UnknownFunction`] for a name with no match.
    pub fn select(&mut self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let f = self
                .functions
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| LutError::UnknownFunction(name.clone()))?;
            selected.push(f.clone());
        }
        self.functions = selected;
        Ok(())
    }
}

/// Accepts modes as command-line tokens or report labels.
fn modes_from_names<'de, D>(deserializer: D) -> std::result::Result<Vec<Mode>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    names
        .iter()
        .map(|n| n.parse::<Mode>().map_err(serde::de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SweepSettings::default();
        s.validate().unwrap();
        assert_eq!(s.precision, 12);
        assert_eq!(s.functions.len(), 9);
        assert_eq!(s.modes, Mode::SWEPT.to_vec());
        assert!(!s.overwrite);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(SweepSettings::from_toml_str("").unwrap(), SweepSettings::default());
    }

    #[test]
    fn test_modes_accept_labels() {
        let s = SweepSettings::from_toml_str(r#"modes = ["Bior-2.2", "db2"]"#).unwrap();
        assert_eq!(s.modes, vec![Mode::Bior22, Mode::Db2]);
        assert!(SweepSettings::from_toml_str(r#"modes = ["sym4"]"#).is_err());
    }

    #[test]
    fn test_validation_failures() {
        assert!(matches!(
            SweepSettings::from_toml_str("precision = 0"),
            Err(LutError::InvalidConfig { field: "precision", .. })
        ));
        assert!(matches!(
            SweepSettings::from_toml_str("modes = []"),
            Err(LutError::InvalidConfig { field: "modes", .. })
        ));
        // 28 + 6 input bits exceeds the domain limit for Reciprocal.
        assert!(matches!(
            SweepSettings::from_toml_str("precision = 28"),
            Err(LutError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_select() {
        let mut s = SweepSettings::default();
        s.select(&["sigmoid".to_string(), "GeLU".to_string()]).unwrap();
        let names: Vec<_> = s.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Sigmoid", "GeLU"]);
        assert!(s.select(&["relu".to_string()]).is_err());
    }
}
