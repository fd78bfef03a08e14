use serde::Serialize;
use std::collections::BTreeMap;

/// Parses `NAME=value` lines into a name to value mapping. Blank lines and `#` comments are
/// skipped, lines are split at the first `=`, both sides are trimmed. Lines without `=` or with an
/// empty name are ignored. The last occurrence of a duplicate name wins.
pub fn parse_bulk_text(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Outcome of the bulk import, failures are reported per entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BulkImportSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{BulkImportSummary, parse_bulk_text};
    use insta::assert_json_snapshot;
    use std::collections::BTreeMap;

    #[test]
    fn parses_bulk_text() {
        let parsed = parse_bulk_text("# comment\nA=1\nB=2=x\n=skip\nC=\n");
        assert_eq!(
            parsed,
            BTreeMap::from([
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2=x".to_string()),
                ("C".to_string(), "".to_string()),
            ])
        );
    }

    #[test]
    fn ignores_noise_and_trims() {
        let parsed = parse_bulk_text(
            "\r\n   \n  # indented comment\nNO_EQUALS_SIGN\n  API_KEY  =  abc def  \r\n\t=\t\n",
        );
        assert_eq!(
            parsed,
            BTreeMap::from([("API_KEY".to_string(), "abc def".to_string())])
        );

        assert!(parse_bulk_text("").is_empty());
    }

    #[test]
    fn last_duplicate_wins() {
        let parsed = parse_bulk_text("TOKEN=first\nTOKEN=second\nOTHER=x\nTOKEN=third");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["TOKEN"], "third");
        assert_eq!(parsed["OTHER"], "x");
    }

    #[test]
    fn summary_serialization() {
        assert_json_snapshot!(BulkImportSummary {
            created: 2,
            updated: 1,
            failed: vec!["1BAD".to_string()],
        }, @r###"
        {
          "created": 2,
          "updated": 1,
          "failed": [
            "1BAD"
          ]
        }
        "###);
    }
}
