//! Query workspace holding the attached corpora
use elusive_core::config::RunConfig;
use elusive_core::error::{ElusiveError, ElusiveResult};
use rusqlite::{params, Connection, OpenFlags};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fixed name of the observation table inside every corpus
pub const OBSERVATION_TABLE: &str = "otus";

/// Extension marking a corpus-bundle directory
const BUNDLE_EXTENSION: &str = "sdb";

/// Database filename nested inside a corpus bundle
const BUNDLE_DB_FILENAME: &str = "otus.sqlite3";

/// Columns every observation table must provide
const REQUIRED_COLUMNS: [&str; 3] = ["taxonomy", "marker_id", "coverage"];

/// The three corpora a session can attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corpus {
    Reads,
    Bins,
    Assemblies,
}

impl Corpus {
    /// Schema alias the corpus is attached under
    pub fn alias(self) -> &'static str {
        match self {
            Self::Reads => "reads",
            Self::Bins => "bins",
            Self::Assemblies => "assemblies",
        }
    }

    /// Name of the corpus's aggregate summary table in the workspace
    pub fn summary_table(self) -> String {
        format!("{}_summary", self.alias())
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alias())
    }
}

/// One query workspace with all input corpora visible as attached schemas.
///
/// The workspace is either a caller-specified database file (kept around for
/// inspection after the run) or an ephemeral in-memory database. The
/// connection, and with it every attached corpus, is released when the
/// session drops, on success and failure paths alike.
pub struct CorpusSession {
    connection: Connection,
    output: Option<PathBuf>,
    has_assemblies: bool,
}

impl CorpusSession {
    /// Open the output workspace and attach the configured corpora.
    ///
    /// Reads and bins are mandatory; assemblies is attached only when its
    /// path is supplied. Each corpus is validated against the observation
    /// schema contract at attach time.
    pub fn open(config: &RunConfig) -> ElusiveResult<Self> {
        config.validate()?;

        let connection = match &config.output_db {
            Some(path) => Self::open_workspace(path, config.force)?,
            None => Connection::open_in_memory()?,
        };

        let session = CorpusSession {
            connection,
            output: config.output_db.clone(),
            has_assemblies: config.has_assemblies(),
        };

        session.attach(&config.reads_db, Corpus::Reads)?;
        session.attach(&config.bins_db, Corpus::Bins)?;
        if let Some(path) = &config.assemblies_db {
            session.attach(path, Corpus::Assemblies)?;
        }

        Ok(session)
    }

    /// Resolve a corpus path: a directory using the `.sdb` bundle convention
    /// is rewritten to the database file nested inside it, anything else is
    /// used as-is.
    pub fn resolve_corpus_path(path: &Path) -> PathBuf {
        let is_bundle = path.is_dir()
            && path
                .extension()
                .is_some_and(|extension| extension == BUNDLE_EXTENSION);
        if is_bundle {
            path.join(BUNDLE_DB_FILENAME)
        } else {
            path.to_path_buf()
        }
    }

    /// The underlying workspace connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Whether an assemblies corpus is attached
    pub fn has_assemblies(&self) -> bool {
        self.has_assemblies
    }

    /// Path of the persisted workspace, if one was requested
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Number of tables in the workspace's main schema
    pub fn table_count(&self) -> ElusiveResult<usize> {
        let count: i64 = self.connection.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn open_workspace(path: &Path, force: bool) -> ElusiveResult<Connection> {
        if path.exists() && !Self::is_empty_workspace(path) {
            if !force {
                return Err(ElusiveError::OutputNotEmpty(path.to_path_buf()));
            }
            debug!("removing populated workspace {}", path.display());
            fs::remove_file(path)?;
        }
        Ok(Connection::open(path)?)
    }

    // A pre-existing file is reusable only if it opens as a database with no
    // tables; anything unreadable counts as populated.
    fn is_empty_workspace(path: &Path) -> bool {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match Connection::open_with_flags(path, flags) {
            Ok(connection) => {
                let tables: Result<i64, _> = connection.query_row(
                    "SELECT count(*) FROM sqlite_master WHERE type = 'table'",
                    [],
                    |row| row.get(0),
                );
                matches!(tables, Ok(0))
            }
            Err(_) => false,
        }
    }

    fn attach(&self, path: &Path, corpus: Corpus) -> ElusiveResult<()> {
        let resolved = Self::resolve_corpus_path(path);
        if !resolved.is_file() {
            return Err(ElusiveError::CorpusOpen {
                corpus: corpus.alias(),
                path: resolved,
                reason: "no such file".to_string(),
            });
        }
        let target = resolved.to_str().ok_or_else(|| ElusiveError::CorpusOpen {
            corpus: corpus.alias(),
            path: resolved.clone(),
            reason: "path is not valid UTF-8".to_string(),
        })?;

        // The alias is a fixed identifier; only the path is caller-controlled.
        let sql = format!("ATTACH DATABASE ?1 AS {}", corpus.alias());
        self.connection
            .execute(&sql, params![target])
            .map_err(|e| ElusiveError::CorpusOpen {
                corpus: corpus.alias(),
                path: resolved.clone(),
                reason: e.to_string(),
            })?;

        self.validate_contract(corpus)?;
        debug!("attached {} corpus from {}", corpus, resolved.display());
        Ok(())
    }

    // The observation table and its contractual columns must be present,
    // checked here rather than on first query against the alias.
    fn validate_contract(&self, corpus: Corpus) -> ElusiveResult<()> {
        let tables: i64 = self.connection.query_row(
            &format!(
                "SELECT count(*) FROM {}.sqlite_master WHERE type = 'table' AND name = ?1",
                corpus.alias()
            ),
            params![OBSERVATION_TABLE],
            |row| row.get(0),
        )?;
        if tables == 0 {
            return Err(ElusiveError::MalformedCorpus {
                corpus: corpus.alias(),
                reason: format!("missing {} table", OBSERVATION_TABLE),
            });
        }

        let mut statement = self.connection.prepare(&format!(
            "PRAGMA {}.table_info({})",
            corpus.alias(),
            OBSERVATION_TABLE
        ))?;
        let columns = statement
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<HashSet<String>, _>>()?;

        for column in REQUIRED_COLUMNS {
            if !columns.contains(column) {
                return Err(ElusiveError::MalformedCorpus {
                    corpus: corpus.alias(),
                    reason: format!(
                        "{} table is missing the {} column",
                        OBSERVATION_TABLE, column
                    ),
                });
            }
        }
        Ok(())
    }
}
