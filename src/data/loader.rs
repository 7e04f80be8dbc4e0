use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{Dataset, TripRecord};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a CSV file into a [`Dataset`].
///
/// All variants are recoverable at the UI boundary: the app shows the message
/// in the status bar and keeps the previous dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: column '{column}' has unparseable value '{value}'")]
    BadValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// The columns every input file must carry. Order in the file is free and
/// extra columns are ignored.
const REQUIRED_COLUMNS: [&str; 4] = ["date", "dispatching_base_number", "active_vehicles", "trips"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a trip dataset from a CSV file.
///
/// Expected header: `date, dispatching_base_number, active_vehicles, trips`
/// (any column order). Dates may be ISO (`2015-01-01`) or US-style
/// (`1/1/2015`, as in the original FOIL export).
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut indices = [0usize; 4];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))?;
    }
    let [date_idx, base_idx, vehicles_idx, trips_idx] = indices;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let field = |idx: usize| record.get(idx).unwrap_or("");

        records.push(TripRecord {
            date: parse_date(field(date_idx), row_no)?,
            base: field(base_idx).to_string(),
            active_vehicles: parse_count(field(vehicles_idx), row_no, "active_vehicles")?,
            trips: parse_count(field(trips_idx), row_no, "trips")?,
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn parse_date(s: &str, row: usize) -> Result<NaiveDate, LoadError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .map_err(|_| LoadError::BadValue {
            row,
            column: "date",
            value: s.to_string(),
        })
}

fn parse_count(s: &str, row: usize, column: &'static str) -> Result<u32, LoadError> {
    s.trim().parse::<u32>().map_err(|_| LoadError::BadValue {
        row,
        column,
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write `content` to a unique temp file and return its path.
    fn temp_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("trip-pulse-test-{name}.csv"));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_the_foil_layout() {
        let path = temp_csv(
            "foil",
            "dispatching_base_number,date,active_vehicles,trips\n\
             B02512,1/1/2015,190,1132\n\
             B02765,1/2/2015,225,1765\n",
        );
        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(ds.records[0].base, "B02512");
        assert_eq!(ds.records[1].trips, 1765);
    }

    #[test]
    fn accepts_iso_dates_and_ignores_extra_columns() {
        let path = temp_csv(
            "iso",
            "date,dispatching_base_number,active_vehicles,trips,weather\n\
             2015-02-14,B02598,80,400,rainy\n",
        );
        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.records[0].date, NaiveDate::from_ymd_opt(2015, 2, 14).unwrap());
        assert_eq!(ds.records[0].active_vehicles, 80);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let path = temp_csv("missing", "date,active_vehicles,trips\n2015-01-01,1,2\n");
        match load_csv(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "dispatching_base_number"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_a_value_error() {
        let path = temp_csv(
            "baddate",
            "date,dispatching_base_number,active_vehicles,trips\nsoon,B02512,1,2\n",
        );
        match load_csv(&path) {
            Err(LoadError::BadValue { row, column, value }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "date");
                assert_eq!(value, "soon");
            }
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn negative_counts_are_rejected() {
        let path = temp_csv(
            "negative",
            "date,dispatching_base_number,active_vehicles,trips\n2015-01-01,B02512,-5,2\n",
        );
        assert!(matches!(
            load_csv(&path),
            Err(LoadError::BadValue { column: "active_vehicles", .. })
        ));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = load_csv(Path::new("/nonexistent/trips.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
    }
}
