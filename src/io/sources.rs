//! Location of the two input files.
//!
//! The data directory is an explicit value: either passed in, or read once from
//! `ECON_DATASETS` (a `.env` file is honoured). There is no search over
//! candidate directories.

use std::path::{Path, PathBuf};

use crate::domain::{AnalysisConfig, DatasetKey};
use crate::error::AppError;

pub const DATASETS_ENV: &str = "ECON_DATASETS";

/// Resolved, existing paths for both datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub dir: PathBuf,
    pub gdp: PathBuf,
    pub inflation: PathBuf,
}

impl DataSources {
    /// Resolve the data directory from config, then from the environment.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AppError> {
        let dir = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => {
                dotenvy::dotenv().ok();
                std::env::var_os(DATASETS_ENV).map(PathBuf::from).ok_or_else(|| {
                    AppError::configuration(format!(
                        "No data directory given: pass --data-dir or set {DATASETS_ENV} (.env)."
                    ))
                })?
            }
        };
        Self::resolve(&dir, &config.gdp_file, &config.inflation_file)
    }

    /// Check that both files exist under `dir`.
    ///
    /// The error names both paths so the caller can see what was searched.
    pub fn resolve(dir: &Path, gdp_file: &str, inflation_file: &str) -> Result<Self, AppError> {
        let gdp = dir.join(gdp_file);
        let inflation = dir.join(inflation_file);

        if !gdp.is_file() || !inflation.is_file() {
            return Err(AppError::configuration(format!(
                "Missing CSV files in '{}'. Tried:\n  {}\n  {}",
                dir.display(),
                gdp.display(),
                inflation.display()
            )));
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            gdp,
            inflation,
        })
    }

    pub fn path(&self, key: DatasetKey) -> &Path {
        match key {
            DatasetKey::Gdp => &self.gdp,
            DatasetKey::Inflation => &self.inflation,
        }
    }

    pub fn file_name(&self, key: DatasetKey) -> String {
        self.path(key)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn resolve_names_both_searched_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("GDP.csv"), "a,b\n").unwrap();

        let err = DataSources::resolve(dir.path(), "GDP.csv", "Inflation1.csv").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.message().contains("GDP.csv"));
        assert!(err.message().contains("Inflation1.csv"));
    }

    #[test]
    fn resolve_accepts_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("GDP.csv"), "a,b\n").unwrap();
        std::fs::write(dir.path().join("Inflation1.csv"), "a,b\n").unwrap();

        let sources = DataSources::resolve(dir.path(), "GDP.csv", "Inflation1.csv").unwrap();
        assert_eq!(sources.file_name(DatasetKey::Inflation), "Inflation1.csv");
        assert_eq!(sources.path(DatasetKey::Gdp), dir.path().join("GDP.csv"));
    }

    #[test]
    fn explicit_dir_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..AnalysisConfig::default()
        };
        let err = DataSources::from_config(&config).unwrap_err();
        assert!(err.message().contains(&dir.path().display().to_string()));
    }
}
