//! Run configuration consumed by the storage layer
use crate::error::{ElusiveError, ElusiveResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one comparator run.
///
/// Built by the CLI from its arguments, but usable directly by library
/// callers. Paths may point either at a corpus database file or at a
/// `.sdb` bundle directory wrapping one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Reads corpus (mandatory)
    pub reads_db: PathBuf,
    /// Bins corpus (mandatory)
    pub bins_db: PathBuf,
    /// Assemblies corpus (optional)
    pub assemblies_db: Option<PathBuf>,
    /// Output workspace database; `None` means an ephemeral in-memory
    /// workspace discarded at process end
    pub output_db: Option<PathBuf>,
    /// Permit deleting a pre-existing non-empty output workspace
    pub force: bool,
}

impl RunConfig {
    /// Validate the configuration before any database work starts.
    ///
    /// Only presence is checked here; whether a path opens as a valid
    /// corpus is checked at attach time.
    pub fn validate(&self) -> ElusiveResult<()> {
        if self.reads_db.as_os_str().is_empty() {
            return Err(ElusiveError::MissingCorpus("reads"));
        }
        if self.bins_db.as_os_str().is_empty() {
            return Err(ElusiveError::MissingCorpus("bins"));
        }
        if let Some(assemblies) = &self.assemblies_db {
            if assemblies.as_os_str().is_empty() {
                return Err(ElusiveError::MissingCorpus("assemblies"));
            }
        }
        Ok(())
    }

    /// Whether an assemblies corpus was supplied
    pub fn has_assemblies(&self) -> bool {
        self.assemblies_db.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> RunConfig {
        RunConfig {
            reads_db: PathBuf::from("reads.sdb"),
            bins_db: PathBuf::from("bins.sdb"),
            assemblies_db: None,
            output_db: None,
            force: false,
        }
    }

    #[test]
    fn test_validate_accepts_minimal_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_required_path() {
        let mut config = base_config();
        config.reads_db = PathBuf::new();

        match config.validate() {
            Err(ElusiveError::MissingCorpus(name)) => assert_eq!(name, "reads"),
            other => panic!("Expected MissingCorpus, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_optional_path() {
        let mut config = base_config();
        config.assemblies_db = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = base_config();
        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.reads_db, config.reads_db);
        assert!(!back.has_assemblies());
    }
}
