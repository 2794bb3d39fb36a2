//! Source file reading: bytes to decoded text to raw rows.
//!
//! The file is decoded before tokenization so cells from single-byte
//! encodings reach the ASCII sanitizer as characters rather than mojibake.
//! No header handling happens here: the first line is a row like any
//! other, and the caller decides whether to skip it.

use std::io::ErrorKind;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{ReadError, ReadResult};

/// One source line as an ordered sequence of text cells.
pub type RawRow = Vec<String>;

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the detected encoding.
///
/// Unknown encodings fall back to lossy UTF-8; decoding never fails.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Read the source file into raw rows.
///
/// A missing file is the one fatal pre-flight condition and maps to
/// [`ReadError::NotFound`] before any transformation or network call.
pub fn read_rows<P: AsRef<Path>>(path: P) -> ReadResult<Vec<RawRow>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ReadError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            ReadError::Io(e)
        }
    })?;

    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);

    parse_rows(&content)
}

/// Tokenize decoded text into rows.
///
/// Quoted cells keep embedded delimiters ("Web,AI" stays one cell);
/// ragged rows are allowed; nothing is trimmed.
pub fn parse_rows(content: &str) -> ReadResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_first_line_is_data() {
        let rows = parse_rows("a,b\n1,2\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[1], vec!["1", "2"]);
    }

    #[test]
    fn test_quoted_delimiter_stays_one_cell() {
        let rows = parse_rows("Foo,\"Web,AI\",Bar\n").unwrap();
        assert_eq!(rows[0], vec!["Foo", "Web,AI", "Bar"]);
    }

    #[test]
    fn test_ragged_rows_allowed() {
        let rows = parse_rows("a,b,c\n1,2\n1,2,3,4\n").unwrap();
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_cells_not_trimmed() {
        let rows = parse_rows("\" a \",b\n").unwrap();
        assert_eq!(rows[0][0], " a ");
    }

    #[test]
    fn test_read_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Name,Year\nFoo,2019\n").unwrap();

        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["Foo", "2019"]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = read_rows("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ReadError::NotFound { .. }));
        assert!(err.to_string().contains("not/here.csv"));
    }

    #[test]
    fn test_detect_encoding_ascii_is_utf8() {
        assert_eq!(detect_encoding(b"plain ascii"), "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Café" in ISO-8859-1
        let bytes: &[u8] = &[0x43, 0x61, 0x66, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert!(decoded.starts_with("Caf"));
        assert_eq!(decoded.chars().count(), 4);
    }
}
