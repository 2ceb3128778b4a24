//! Survey export loader with encoding and delimiter auto-detection.
//!
//! Turns the raw CSV export into a [`Table`]. Quoted cells are honored, so a
//! multi-select answer such as `"Leadership, Aggression"` stays in one cell.
//! Empty cells load as `Null`.

use csv::{ReaderBuilder, Trim};
use serde_json::Value;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::table::Table;

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed table, column names exactly as in the header
    pub table: Table,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

impl ParseResult {
    pub fn headers(&self) -> &[String] {
        self.table.columns()
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => {
            let (text, _) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
            text.into_owned()
        }
        // WHATWG treats latin-1 labels as windows-1252
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to a comma, the delimiter of the spreadsheet export.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into a table with an explicit delimiter.
///
/// # Example
/// ```ignore
/// use mcdc::parser::csv_to_table;
///
/// let csv = "Submission ID,Hero (Player 1)\n1,Thor";
/// let table = csv_to_table(csv, ',').unwrap();
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.columns()[1], "Hero (Player 1)");
/// ```
pub fn csv_to_table(content: &str, delimiter: char) -> CsvResult<Table> {
    if !delimiter.is_ascii() {
        return Err(CsvError::new(0, format!("Delimiter '{}' is not ASCII", delimiter)));
    }

    if content.trim().is_empty() {
        return Err(CsvError::new(1, "Empty CSV file"));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::new(1, format!("Cannot read header: {}", e)))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::new(1, "No headers found"));
    }

    let mut table = Table::new(headers.clone());

    for (idx, result) in reader.records().enumerate() {
        let line_num = idx + 2; // +1 for 0-index, +1 for header

        let record = result.map_err(|e| {
            let line = e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(line_num);
            CsvError::new(line, format!("Cannot read row: {}", e))
        })?;

        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let row = (0..headers.len())
            .map(|i| match record.get(i) {
                Some(cell) if !cell.is_empty() => Value::String(cell.to_string()),
                _ => Value::Null,
            })
            .collect();

        table
            .push_row(row)
            .map_err(|e| CsvError::new(line_num, e.to_string()))?;
    }

    Ok(table)
}

/// Parse CSV file with auto-detection of encoding and delimiter.
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        CsvError::new(0, format!("Cannot read file '{}': {}", path.display(), e))
    })?;

    parse_bytes_auto(&bytes)
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    log::debug!("Detected encoding '{}' and delimiter {:?}", encoding, delimiter);

    let table = csv_to_table(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_simple_csv() {
        let csv = "name,age\nAlice,30\nBob,25";
        let table = csv_to_table(csv, ',').unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["name", "age"]);
        assert_eq!(table.rows()[0], vec![json!("Alice"), json!("30")]);
        assert_eq!(table.rows()[1], vec![json!("Bob"), json!("25")]);
    }

    #[test]
    fn test_quoted_multi_value_cell() {
        let csv = "Submission ID,Aspect (Player 1)\n1,\"Leadership, Aggression\"";
        let table = csv_to_table(csv, ',').unwrap();

        assert_eq!(table.rows()[0][1], json!("Leadership, Aggression"));
    }

    #[test]
    fn test_empty_cells_are_null() {
        let csv = "a,b,c\n1,,3";
        let table = csv_to_table(csv, ',').unwrap();

        assert_eq!(table.rows()[0], vec![json!("1"), Value::Null, json!("3")]);
    }

    #[test]
    fn test_short_rows_padded_and_extra_cells_ignored() {
        let csv = "a,b,c\n1\n4,5,6,7";
        let table = csv_to_table(csv, ',').unwrap();

        assert_eq!(table.rows()[0], vec![json!("1"), Value::Null, Value::Null]);
        assert_eq!(table.rows()[1], vec![json!("4"), json!("5"), json!("6")]);
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "a;b\n1;2\n\n3;4\n";
        let table = csv_to_table(csv, ';').unwrap();

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_csv_error() {
        let err = csv_to_table("", ',').unwrap_err();
        assert!(err.message.contains("Empty"));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "Submission ID,Outcome\n1,Win\n2,Loss";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ',');
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.table.len(), 2);
        assert_eq!(result.headers(), ["Submission ID", "Outcome"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Submission ID,Hero (Player 1)\n7,Thor\n").unwrap();

        let result = parse_csv_file_auto(file.path()).unwrap();
        assert_eq!(result.table.rows()[0], vec![json!("7"), json!("Thor")]);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_csv_file_auto("/definitely/not/here.csv").unwrap_err();
        assert!(err.message.contains("Cannot read file"));
    }
}
