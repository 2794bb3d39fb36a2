//! Record transformation: raw rows to typed JSON records.
//!
//! Each cell at position `i` pairs with `fields[i]` from the config.
//! Year-kind fields (name contains `"Year"`) coerce to integers,
//! list-kind fields split on commas into string arrays, and everything
//! else passes through as sanitized text.
//!
//! The transformer never fails a row: malformed cells degrade to 0, an
//! empty array, or an empty string, and each degradation is recorded as
//! a [`CoercionNote`] so operators can audit what the best-effort rules
//! did to dirty input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::LoadConfig;
use crate::reader::RawRow;

/// Bytes outside 7-bit ASCII, deleted by [`sanitize`].
static NON_ASCII: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x00-\x7F]").unwrap());

// =============================================================================
// Field classification
// =============================================================================

/// How a field's cells are coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer year extracted from the tail of the cell.
    Year,
    /// Comma-separated list of strings.
    List,
    /// Sanitized text, verbatim.
    Plain,
}

/// Classify a field name.
///
/// The `Year` substring check wins over list membership, matching the
/// coercion precedence of the field rules.
pub fn classify(field: &str, config: &LoadConfig) -> FieldKind {
    if field.contains("Year") {
        FieldKind::Year
    } else if config.is_array_field(field) {
        FieldKind::List
    } else {
        FieldKind::Plain
    }
}

// =============================================================================
// Cell coercion
// =============================================================================

/// Strip every character outside the 7-bit ASCII range.
///
/// Lossy and irreversible: accented characters are deleted, not
/// transliterated or escaped.
pub fn sanitize(text: &str) -> String {
    NON_ASCII.replace_all(text, "").into_owned()
}

/// Extract a year from a sanitized cell, if one is present.
///
/// Cells longer than four characters keep only their last four, so a
/// trailing year inside a longer date string ("03/23/2019") survives.
/// Returns `None` unless the candidate is purely decimal digits; the
/// caller decides what an absent year coerces to.
pub fn year_value(text: &str) -> Option<i64> {
    let chars: Vec<char> = text.chars().collect();
    let candidate: String = if chars.len() > 4 {
        chars[chars.len() - 4..].iter().collect()
    } else {
        text.to_string()
    };

    if candidate.is_empty() || !candidate.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    candidate.parse().ok()
}

/// A silent degradation applied while coercing one cell.
///
/// Notes never block a row; the no-fail contract stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionNote {
    /// Field the degraded cell mapped to.
    pub field: String,
    /// What the coercion did.
    pub message: String,
}

/// One transformed row: the typed record plus any coercion notes.
#[derive(Debug, Clone)]
pub struct TransformedRow {
    /// Field name to coerced value, in schema order.
    pub record: Map<String, Value>,
    /// Degradations applied while coercing this row.
    pub notes: Vec<CoercionNote>,
}

// =============================================================================
// Row transformation
// =============================================================================

/// Transform one raw row against the configured schema.
///
/// Cells beyond the schema length are silently dropped (the "new
/// columns added" tolerance policy); a row shorter than the schema
/// leaves the missing trailing fields absent from the record.
pub fn transform_row(row: &RawRow, config: &LoadConfig) -> TransformedRow {
    let mut record = Map::new();
    let mut notes = Vec::new();

    for (cell, field) in row.iter().zip(config.fields.iter()) {
        let clean = sanitize(cell);
        if clean.len() != cell.len() {
            notes.push(CoercionNote {
                field: field.clone(),
                message: format!("stripped non-ASCII from '{}'", cell),
            });
        }

        let value = match classify(field, config) {
            FieldKind::Year => match year_value(&clean) {
                Some(year) => Value::from(year),
                None => {
                    notes.push(CoercionNote {
                        field: field.clone(),
                        message: format!("defaulted year to 0 for '{}'", clean),
                    });
                    Value::from(0)
                }
            },
            FieldKind::List => {
                if clean.is_empty() {
                    Value::Array(Vec::new())
                } else {
                    Value::Array(
                        clean
                            .split(',')
                            .map(|piece| Value::String(piece.to_string()))
                            .collect(),
                    )
                }
            }
            FieldKind::Plain => Value::String(clean),
        };

        record.insert(field.clone(), value);
    }

    TransformedRow { record, notes }
}

/// Transform every raw row, in order.
pub fn transform_rows(rows: &[RawRow], config: &LoadConfig) -> Vec<TransformedRow> {
    rows.iter().map(|row| transform_row(row, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LoadConfig {
        LoadConfig::default()
    }

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_classify_precedence() {
        let config = config();
        assert_eq!(classify("Year", &config), FieldKind::Year);
        assert_eq!(classify("MonthYear", &config), FieldKind::Year);
        assert_eq!(classify("Tags", &config), FieldKind::List);
        assert_eq!(classify("Name", &config), FieldKind::Plain);
    }

    #[test]
    fn test_sanitize_strips_non_ascii() {
        assert_eq!(sanitize("Café"), "Caf");
        assert_eq!(sanitize("naïve café"), "nave caf");
        assert_eq!(sanitize("plain"), "plain");
    }

    #[test]
    fn test_year_from_date_string() {
        assert_eq!(year_value("03/23/2019"), Some(2019));
        assert_eq!(year_value("March 2019"), Some(2019));
    }

    #[test]
    fn test_year_short_digits_convert_directly() {
        assert_eq!(year_value("2019"), Some(2019));
        assert_eq!(year_value("19"), Some(19));
    }

    #[test]
    fn test_year_unparsable() {
        assert_eq!(year_value("abcd"), None);
        assert_eq!(year_value(""), None);
        assert_eq!(year_value("20x9"), None);
        // last four of "March" are "arch"
        assert_eq!(year_value("March"), None);
    }

    #[test]
    fn test_year_coerces_to_zero_with_note() {
        let transformed = transform_row(
            &row(&["Foo", "HackX", "Web", "sometime", "x", "a", "d", "w", "@t"]),
            &config(),
        );
        assert_eq!(transformed.record["Year"], Value::from(0));
        assert!(transformed
            .notes
            .iter()
            .any(|n| n.field == "Year" && n.message.contains("defaulted")));
    }

    #[test]
    fn test_empty_list_cell_is_empty_array() {
        let transformed = transform_row(
            &row(&["Foo", "HackX", "", "2019", "", "a", "d", "w", "@t"]),
            &config(),
        );
        assert_eq!(transformed.record["ApplicationArea"], Value::Array(vec![]));
        assert_eq!(transformed.record["Tags"], Value::Array(vec![]));
    }

    #[test]
    fn test_list_cell_splits_on_comma() {
        let transformed = transform_row(
            &row(&["Foo", "HackX", "Web,AI", "2019", "x,y", "a", "d", "w", "@t"]),
            &config(),
        );
        assert_eq!(
            transformed.record["ApplicationArea"],
            serde_json::json!(["Web", "AI"])
        );
        assert_eq!(transformed.record["Tags"], serde_json::json!(["x", "y"]));
    }

    #[test]
    fn test_list_pieces_not_trimmed() {
        let transformed = transform_row(
            &row(&["Foo", "HackX", " a , b", "2019", "", "", "", "", ""]),
            &config(),
        );
        assert_eq!(
            transformed.record["ApplicationArea"],
            serde_json::json!([" a ", " b"])
        );
    }

    #[test]
    fn test_extra_cells_dropped() {
        let transformed = transform_row(
            &row(&["Foo", "HackX", "Web", "2019", "x", "a", "d", "w", "@t", "extra", "more"]),
            &config(),
        );
        assert_eq!(transformed.record.len(), 9);
    }

    #[test]
    fn test_short_row_leaves_fields_absent() {
        let transformed = transform_row(&row(&["Foo", "HackX"]), &config());
        assert_eq!(transformed.record.len(), 2);
        assert!(transformed.record.get("Year").is_none());
        assert!(transformed.record.get("Twitter").is_none());
    }

    #[test]
    fn test_plain_field_passes_through() {
        let transformed = transform_row(
            &row(&["Café Crawler", "HackX", "", "2019", "", "", "", "", ""]),
            &config(),
        );
        assert_eq!(transformed.record["Name"], Value::String("Caf Crawler".into()));
        assert!(transformed
            .notes
            .iter()
            .any(|n| n.field == "Name" && n.message.contains("non-ASCII")));
    }

    #[test]
    fn test_clean_row_has_no_notes() {
        let transformed = transform_row(
            &row(&["Foo", "HackX", "Web", "2019", "x", "a", "d", "w", "@t"]),
            &config(),
        );
        assert!(transformed.notes.is_empty());
    }

    #[test]
    fn test_transform_rows_keeps_order() {
        let rows = vec![
            row(&["First", "H", "", "2018", "", "", "", "", ""]),
            row(&["Second", "H", "", "2019", "", "", "", "", ""]),
        ];
        let transformed = transform_rows(&rows, &config());
        assert_eq!(transformed.len(), 2);
        assert_eq!(transformed[0].record["Name"], "First");
        assert_eq!(transformed[1].record["Name"], "Second");
        assert_eq!(transformed[1].record["Year"], Value::from(2019));
    }
}
