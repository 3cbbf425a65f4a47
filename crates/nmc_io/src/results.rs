//! Results table writer.
//!
//! Serialises a [`ResultSet`] to delimited text for external reporting:
//! one row per time index, a `time` column first, then one column per
//! requested XVA kind in canonical order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use nmc_core::{ResultSet, TimeGrid};

use crate::error::IoError;

/// Writes the results table to `writer`.
///
/// # Errors
///
/// Returns [`IoError::ProfileLengthMismatch`] if any profile disagrees
/// with the grid length, or an underlying write error.
pub fn write_result_set<W: Write>(
    writer: W,
    grid: &TimeGrid,
    results: &ResultSet,
) -> Result<(), IoError> {
    let n = grid.n_points();
    for (kind, profile) in results.iter() {
        if profile.len() != n {
            return Err(IoError::ProfileLengthMismatch {
                kind: kind.token().to_string(),
                expected: n,
                actual: profile.len(),
            });
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["time".to_string()];
    header.extend(results.kinds().map(|kind| kind.token().to_string()));
    csv_writer.write_record(&header)?;

    for (j, time) in grid.times().enumerate() {
        let mut record = vec![time.to_string()];
        for (_, profile) in results.iter() {
            // Length checked above.
            record.push(profile.values()[j].to_string());
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the results table to a file at `path`.
pub fn write_result_set_to_path<P: AsRef<Path>>(
    path: P,
    grid: &TimeGrid,
    results: &ResultSet,
) -> Result<(), IoError> {
    write_result_set(File::create(path)?, grid, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::NumericTable;
    use nmc_core::{ExposureProfile, XvaKind};

    fn sample_results() -> ResultSet {
        let mut results = ResultSet::new();
        results.insert(XvaKind::Kva, ExposureProfile::from_values(vec![0.0, 0.3, 0.2]));
        results.insert(XvaKind::Cva, ExposureProfile::from_values(vec![0.0, 0.1, 0.05]));
        results
    }

    #[test]
    fn test_layout_one_row_per_time_index() {
        let grid = TimeGrid::new(1.5, 3).unwrap();
        let mut buffer = Vec::new();
        write_result_set(&mut buffer, &grid, &sample_results()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        // Kind columns come out in canonical order.
        assert_eq!(lines[0], "time,CVA,KVA");
        assert!(lines[1].starts_with("0,"));
    }

    #[test]
    fn test_written_table_reads_back() {
        let grid = TimeGrid::new(1.5, 3).unwrap();
        let mut buffer = Vec::new();
        write_result_set(&mut buffer, &grid, &sample_results()).unwrap();

        let table = NumericTable::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.value(1, "time"), Some(0.5));
        assert_eq!(table.value(1, "CVA"), Some(0.1));
        assert_eq!(table.value(2, "KVA"), Some(0.2));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let grid = TimeGrid::new(1.0, 5).unwrap();
        let err = write_result_set(Vec::new(), &grid, &sample_results()).unwrap_err();
        assert!(matches!(err, IoError::ProfileLengthMismatch { .. }));
    }

    #[test]
    fn test_empty_result_set_writes_time_column_only() {
        let grid = TimeGrid::new(1.0, 2).unwrap();
        let mut buffer = Vec::new();
        write_result_set(&mut buffer, &grid, &ResultSet::new()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().next(), Some("time"));
        assert_eq!(text.lines().count(), 3);
    }
}
