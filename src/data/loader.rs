use std::fs::File;
use std::path::Path;

use crate::error::LoadError;

use super::model::{CellValue, Column, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a CSV file: first row is the header, every other row is data.
///
/// Column types are inferred per column, the way a dataframe reader does it:
/// * empty field            → `Null`
/// * every value an integer → `Integer` column
/// * every value a number   → `Float` column
/// * every value true/false → `Bool` column
/// * anything else          → `Text` column (all values kept verbatim)
///
/// Only empty fields count as missing. Unlike pandas' default NA list,
/// sentinels such as `NA`, `N/A`, `NaN` or `null` are ordinary strings, so a
/// numeric column containing one is loaded as text.
///
/// Nothing is retained on failure.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let malformed = |source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers = reader.byte_headers().map_err(malformed)?.clone();
    if headers.is_empty() {
        return Err(LoadError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    let names = normalise_headers(headers.iter().map(decode_field));

    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    let mut record = csv::ByteRecord::new();
    while reader.read_byte_record(&mut record).map_err(malformed)? {
        for (col_idx, field) in record.iter().enumerate() {
            let cell = (!field.is_empty()).then(|| decode_field(field));
            raw[col_idx].push(cell);
        }
    }

    let columns = names
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| infer_column(name, cells))
        .collect();

    Ok(Dataset::new(columns)?)
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// Blank headers become `Unnamed: <idx>`; repeats get `.1`, `.2`, … suffixes.
fn normalise_headers(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (idx, name) in raw.enumerate() {
        let name = if idx == 0 {
            name.trim_start_matches('\u{feff}').to_string()
        } else {
            name
        };
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut suffix = 0;
        while names.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}.{suffix}");
        }
        names.push(candidate);
    }
    names
}

/// UTF-8 where possible, Latin-1 otherwise.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

fn infer_kind(cells: &[Option<String>]) -> ColumnKind {
    let present: Vec<&str> = cells.iter().flatten().map(String::as_str).collect();
    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if present.iter().all(|s| parse_float(s).is_some()) {
        ColumnKind::Float
    } else if present.iter().all(|s| parse_bool(s).is_some()) {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

fn infer_column(name: String, cells: Vec<Option<String>>) -> Column {
    let kind = infer_kind(&cells);
    let values = cells
        .into_iter()
        .map(|cell| match (kind, cell) {
            (_, None) => CellValue::Null,
            (ColumnKind::Integer, Some(s)) => s.parse().map_or(CellValue::Null, CellValue::Integer),
            (ColumnKind::Float, Some(s)) => parse_float(&s).map_or(CellValue::Null, CellValue::Float),
            (ColumnKind::Bool, Some(s)) => parse_bool(&s).map_or(CellValue::Null, CellValue::Bool),
            (ColumnKind::Text, Some(s)) => CellValue::Text(s),
        })
        .collect();

    Column::new(name, values)
}

/// Numbers must contain a digit, so words like "nan" or "inf" stay text.
fn parse_float(s: &str) -> Option<f64> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("create csv");
        file.write_all(contents).expect("write csv");
        path
    }

    #[test]
    fn infers_column_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "people.csv",
            b"Name,Age,Score,Active,Code\nAlice,30,1.5,true,A1\nBob,,2,False,42\n",
        );

        let ds = load_csv(&path).expect("load");
        assert_eq!(ds.column_names(), vec!["Name", "Age", "Score", "Active", "Code"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(
            ds.column("Age").unwrap().values,
            vec![CellValue::Integer(30), CellValue::Null]
        );
        assert_eq!(
            ds.column("Score").unwrap().values,
            vec![CellValue::Float(1.5), CellValue::Float(2.0)]
        );
        assert_eq!(
            ds.column("Active").unwrap().values,
            vec![CellValue::Bool(true), CellValue::Bool(false)]
        );
        // Mixed column stays text throughout.
        assert_eq!(
            ds.column("Code").unwrap().values,
            vec![CellValue::Text("A1".into()), CellValue::Text("42".into())]
        );
    }

    #[test]
    fn na_sentinels_are_text_not_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "na.csv", b"Age,Note
30,NA
NA,
25,null
");

        let ds = load_csv(&path).expect("load");
        assert_eq!(
            ds.column("Age").unwrap().values,
            vec![
                CellValue::Text("30".into()),
                CellValue::Text("NA".into()),
                CellValue::Text("25".into())
            ]
        );
        assert_eq!(
            ds.column("Note").unwrap().values,
            vec![
                CellValue::Text("NA".into()),
                CellValue::Null,
                CellValue::Text("null".into())
            ]
        );
    }

    #[test]
    fn handles_quoted_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "quoted.csv",
            b"Name,Notes\n\"Smith, J\",\"line one\nline two\"\n",
        );

        let ds = load_csv(&path).expect("load");
        assert_eq!(ds.row_count(), 1);
        assert_eq!(ds.column("Name").unwrap().values[0], CellValue::Text("Smith, J".into()));
        assert_eq!(
            ds.column("Notes").unwrap().values[0],
            CellValue::Text("line one\nline two".into())
        );
    }

    #[test]
    fn renames_blank_and_duplicate_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "dups.csv", b"\xEF\xBB\xBFA,,A,A\n1,2,3,4\n");

        let ds = load_csv(&path).expect("load");
        assert_eq!(ds.column_names(), vec!["A", "Unnamed: 1", "A.1", "A.2"]);
    }

    #[test]
    fn falls_back_to_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "latin.csv", b"City\nS\xE3o Paulo\n");

        let ds = load_csv(&path).expect("load");
        assert_eq!(ds.column("City").unwrap().values[0], CellValue::Text("São Paulo".into()));
    }

    #[test]
    fn reports_missing_file() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).expect_err("missing file");
        assert!(matches!(err, LoadError::Open { .. }), "unexpected error: {err}");
    }

    #[test]
    fn reports_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "ragged.csv", b"A,B\n1,2\n3\n");

        let err = load_csv(&path).expect_err("ragged csv");
        assert!(matches!(err, LoadError::Malformed { .. }), "unexpected error: {err}");
    }

    #[test]
    fn reports_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "empty.csv", b"");

        let err = load_csv(&path).expect_err("empty csv");
        assert!(matches!(err, LoadError::MissingHeader { .. }), "unexpected error: {err}");
    }
}
