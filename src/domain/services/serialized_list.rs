use serde::Serializer;

/// Reads a list column. Rows written by this service hold a JSON array, but
/// older rows may hold a plain comma separated string, so both are accepted.
pub fn parse_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
        return values
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s.trim().to_string()),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect();
    }

    trimmed
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn encode_list(items: &[String]) -> String {
    let cleaned: Vec<&str> = items.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
    serde_json::to_string(&cleaned).unwrap_or_else(|_| "[]".to_string())
}

pub fn serialize_list<S: Serializer>(raw: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(parse_list(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let parsed = parse_list(r#"["Onsen view", " King bed ", ""]"#);
        assert_eq!(parsed, vec!["Onsen view", "King bed"]);
    }

    #[test]
    fn test_parse_falls_back_to_comma_split() {
        let parsed = parse_list("Wifi, Minibar,, Bathtub ");
        assert_eq!(parsed, vec!["Wifi", "Minibar", "Bathtub"]);
    }

    #[test]
    fn test_parse_broken_json_is_comma_split() {
        let parsed = parse_list(r#"["a", "b""#);
        assert_eq!(parsed, vec![r#"["a""#, r#""b""#]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("   ").is_empty());
        assert!(parse_list("[]").is_empty());
    }

    #[test]
    fn test_encode_drops_blank_entries() {
        let encoded = encode_list(&["https://cdn/x.jpg".to_string(), "  ".to_string()]);
        assert_eq!(encoded, r#"["https://cdn/x.jpg"]"#);
        assert_eq!(parse_list(&encoded), vec!["https://cdn/x.jpg"]);
    }
}
