//! The comparator pipeline: summarize, compare, find elusive
use elusive_core::config::RunConfig;
use elusive_core::error::ElusiveResult;
use elusive_core::taxonomy::{Rank, DOMAIN_ARCHAEA, DOMAIN_BACTERIA};
use elusive_core::types::{CompareRecord, ElusiveRecord};
use rusqlite::params;
use std::path::Path;
use tracing::info;

use crate::report;
use crate::session::{Corpus, CorpusSession, OBSERVATION_TABLE};

/// Row counts of the tables built by [`CrossCorpusComparator::compare`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareStats {
    pub reads_summary: usize,
    pub bins_summary: usize,
    pub assemblies_summary: Option<usize>,
    pub compare: usize,
}

/// Drives the strictly sequential pipeline over one [`CorpusSession`]:
/// per-corpus summaries and the comparison table first, then the elusive
/// table, then the exported report.
pub struct CrossCorpusComparator {
    session: CorpusSession,
}

impl CrossCorpusComparator {
    /// Open the workspace and attach the configured corpora
    pub fn new(config: &RunConfig) -> ElusiveResult<Self> {
        Ok(Self {
            session: CorpusSession::open(config)?,
        })
    }

    /// Whether an assemblies corpus is attached
    pub fn has_assemblies(&self) -> bool {
        self.session.has_assemblies()
    }

    /// The session backing this comparator
    pub fn session(&self) -> &CorpusSession {
        &self.session
    }

    /// Build one aggregate summary per attached corpus, then the comparison
    /// table joining the reads summary against the others.
    pub fn compare(&self) -> ElusiveResult<CompareStats> {
        self.summarize(Corpus::Reads)?;
        self.summarize(Corpus::Bins)?;
        if self.session.has_assemblies() {
            self.summarize(Corpus::Assemblies)?;
        }
        self.build_compare()?;

        let stats = CompareStats {
            reads_summary: self.count_rows(&Corpus::Reads.summary_table())?,
            bins_summary: self.count_rows(&Corpus::Bins.summary_table())?,
            assemblies_summary: if self.session.has_assemblies() {
                Some(self.count_rows(&Corpus::Assemblies.summary_table())?)
            } else {
                None
            },
            compare: self.count_rows("compare")?,
        };
        info!(
            "built summaries (reads: {}, bins: {}{}) and compare table ({} rows)",
            stats.reads_summary,
            stats.bins_summary,
            match stats.assemblies_summary {
                Some(count) => format!(", assemblies: {}", count),
                None => String::new(),
            },
            stats.compare
        );
        Ok(stats)
    }

    /// Build the elusive table from the comparison table and return its
    /// rows, ordered by descending max coverage.
    ///
    /// Requires [`compare`](Self::compare) to have run in this session; the
    /// statement fails with a `Database` error otherwise.
    pub fn find_elusive(&self) -> ElusiveResult<Vec<ElusiveRecord>> {
        let assembly_column = if self.session.has_assemblies() {
            ", MAX(assembly) AS assembly"
        } else {
            ""
        };
        let sql = format!(
            "CREATE TABLE elusive AS \
             SELECT taxonomy, \
                    COUNT(DISTINCT marker_id) AS count_marker_id, \
                    MAX(sum_coverage) AS max_sum_coverage, \
                    MAX(bin) AS bin{} \
             FROM compare \
             WHERE bin = 0 AND instr(taxonomy, ?1) > 0 \
             GROUP BY taxonomy \
             ORDER BY max_sum_coverage DESC",
            assembly_column
        );
        self.session
            .connection()
            .execute(&sql, params![Rank::Genus.boundary_token()])?;

        let records = self.elusive_records()?;
        info!("found {} elusive taxa", records.len());
        Ok(records)
    }

    /// Export elusive records as a CSV report. Returns the row count.
    pub fn export_report<P: AsRef<Path>>(
        &self,
        path: P,
        records: &[ElusiveRecord],
    ) -> ElusiveResult<usize> {
        report::export_csv(path, records, self.session.has_assemblies())
    }

    /// The comparison table's rows, in table order
    pub fn compare_records(&self) -> ElusiveResult<Vec<CompareRecord>> {
        let has_assemblies = self.session.has_assemblies();
        let columns = if has_assemblies {
            "taxonomy, marker_id, sum_coverage, bin, assembly"
        } else {
            "taxonomy, marker_id, sum_coverage, bin"
        };
        let mut statement = self
            .session
            .connection()
            .prepare(&format!("SELECT {} FROM compare", columns))?;
        let rows = statement.query_map([], |row| {
            Ok(CompareRecord {
                taxonomy: row.get(0)?,
                marker_id: row.get(1)?,
                sum_coverage: row.get(2)?,
                bin: row.get(3)?,
                assembly: if has_assemblies {
                    Some(row.get(4)?)
                } else {
                    None
                },
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // One atomic statement per corpus. Ordering by summed coverage is a
    // convenience for workspace inspection, not a semantic requirement.
    fn summarize(&self, corpus: Corpus) -> ElusiveResult<()> {
        let sql = format!(
            "CREATE TABLE {summary} AS \
             SELECT taxonomy, marker_id, SUM(coverage) AS sum_coverage \
             FROM {alias}.{table} \
             WHERE instr(taxonomy, ?1) > 0 OR instr(taxonomy, ?2) > 0 \
             GROUP BY taxonomy, marker_id \
             ORDER BY sum_coverage DESC",
            summary = corpus.summary_table(),
            alias = corpus.alias(),
            table = OBSERVATION_TABLE,
        );
        self.session
            .connection()
            .execute(&sql, params![DOMAIN_BACTERIA, DOMAIN_ARCHAEA])?;
        Ok(())
    }

    // Joins target the distinct-taxonomy projection of each summary so the
    // output keeps exactly one row per reads-summary row even when a
    // right-side taxonomy spans several markers.
    fn build_compare(&self) -> ElusiveResult<()> {
        let sql = if self.session.has_assemblies() {
            "CREATE TABLE compare AS \
             SELECT reads_summary.taxonomy AS taxonomy, \
                    reads_summary.marker_id AS marker_id, \
                    reads_summary.sum_coverage AS sum_coverage, \
                    bins.taxonomy IS NOT NULL AS bin, \
                    assemblies.taxonomy IS NOT NULL AS assembly \
             FROM reads_summary \
             LEFT JOIN (SELECT DISTINCT taxonomy FROM bins_summary) AS bins \
               ON reads_summary.taxonomy = bins.taxonomy \
             LEFT JOIN (SELECT DISTINCT taxonomy FROM assemblies_summary) AS assemblies \
               ON reads_summary.taxonomy = assemblies.taxonomy"
        } else {
            "CREATE TABLE compare AS \
             SELECT reads_summary.taxonomy AS taxonomy, \
                    reads_summary.marker_id AS marker_id, \
                    reads_summary.sum_coverage AS sum_coverage, \
                    bins.taxonomy IS NOT NULL AS bin \
             FROM reads_summary \
             LEFT JOIN (SELECT DISTINCT taxonomy FROM bins_summary) AS bins \
               ON reads_summary.taxonomy = bins.taxonomy"
        };
        self.session.connection().execute(sql, [])?;
        Ok(())
    }

    fn elusive_records(&self) -> ElusiveResult<Vec<ElusiveRecord>> {
        let has_assemblies = self.session.has_assemblies();
        let columns = if has_assemblies {
            "taxonomy, count_marker_id, max_sum_coverage, bin, assembly"
        } else {
            "taxonomy, count_marker_id, max_sum_coverage, bin"
        };
        let mut statement = self.session.connection().prepare(&format!(
            "SELECT {} FROM elusive ORDER BY max_sum_coverage DESC",
            columns
        ))?;
        let rows = statement.query_map([], |row| {
            Ok(ElusiveRecord {
                taxonomy: row.get(0)?,
                count_marker_id: row.get(1)?,
                max_sum_coverage: row.get(2)?,
                bin: row.get(3)?,
                assembly: if has_assemblies {
                    Some(row.get(4)?)
                } else {
                    None
                },
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn count_rows(&self, table: &str) -> ElusiveResult<usize> {
        let count: i64 = self.session.connection().query_row(
            &format!("SELECT count(*) FROM {}", table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
