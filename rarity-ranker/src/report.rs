//! Report rendering
//!
//! The report is a JSON array of `{ "ID": .., "Rarity": .. }` objects,
//! pretty-printed with four-space indentation.

use crate::error::Result;
use crate::models::RarityScorecard;
use serde::Serialize;

const INDENT: &[u8] = b"    ";

/// Render scorecards as an indented JSON array
pub fn render_report(top: &[RarityScorecard]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    top.serialize(&mut serializer)?;

    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_field_names_and_indent() {
        let report = render_report(&[
            RarityScorecard::new(2, 0.5),
            RarityScorecard::new(7, 0.25),
        ])
        .unwrap();

        assert!(report.starts_with("[\n    {\n        \"ID\": 2,"), "{}", report);
        assert!(report.contains("\"Rarity\": 0.25"));

        let parsed: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(parsed[1]["ID"], 7);
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render_report(&[]).unwrap(), "[]");
    }
}
