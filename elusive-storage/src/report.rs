//! CSV export of the elusive table
use elusive_core::error::ElusiveResult;
use elusive_core::types::ElusiveRecord;
use std::path::Path;

/// Write elusive records as a comma-delimited report with a header row.
///
/// The `assembly` column is written only when `with_assembly` is set, i.e.
/// when an assemblies corpus was part of the run. Presence flags serialize
/// as `0`/`1`. Returns the number of data rows written.
pub fn export_csv<P: AsRef<Path>>(
    path: P,
    records: &[ElusiveRecord],
    with_assembly: bool,
) -> ElusiveResult<usize> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    if with_assembly {
        writer.write_record([
            "taxonomy",
            "count_marker_id",
            "max_sum_coverage",
            "bin",
            "assembly",
        ])?;
    } else {
        writer.write_record(["taxonomy", "count_marker_id", "max_sum_coverage", "bin"])?;
    }

    for record in records {
        let mut fields = vec![
            record.taxonomy.clone(),
            record.count_marker_id.to_string(),
            record.max_sum_coverage.to_string(),
            u8::from(record.bin).to_string(),
        ];
        if with_assembly {
            fields.push(u8::from(record.assembly.unwrap_or(false)).to_string());
        }
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn sample_record(assembly: Option<bool>) -> ElusiveRecord {
        ElusiveRecord {
            taxonomy: "Root; d__Bacteria; g__Test".to_string(),
            count_marker_id: 3,
            max_sum_coverage: 22.3,
            bin: false,
            assembly,
        }
    }

    #[test]
    fn test_export_without_assembly_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let written = export_csv(&path, &[sample_record(None)], false).unwrap();
        assert_eq!(written, 1);

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "taxonomy,count_marker_id,max_sum_coverage,bin"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Root; d__Bacteria; g__Test,3,22.3,0"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_with_assembly_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        export_csv(&path, &[sample_record(Some(true))], true).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "taxonomy,count_marker_id,max_sum_coverage,bin,assembly"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Root; d__Bacteria; g__Test,3,22.3,0,1"
        );
    }

    #[test]
    fn test_export_empty_report_still_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let written = export_csv(&path, &[], false).unwrap();
        assert_eq!(written, 0);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
