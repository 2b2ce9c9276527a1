//! Parse model output into discrepancy records

use crate::error::AuditError;
use serde_json::Value;
use tracing::{debug, warn};
use ucp_audit_domain::DiscrepancyRecord;

/// Parse the model's JSON response into discrepancy records
///
/// The response must be a bare JSON array (surrounding whitespace allowed).
/// Markdown fences and prose are not stripped. Any element that does not
/// match the record shape fails the whole parse; the error carries the raw
/// response unchanged.
pub fn parse_model_response(raw: &str) -> Result<Vec<DiscrepancyRecord>, AuditError> {
    let json: Value = serde_json::from_str(raw).map_err(|e| {
        warn!("Model response is not valid JSON: {}", e);
        AuditError::parse(format!("JSON parse error: {}", e), raw)
    })?;

    let elements = match json {
        Value::Array(elements) => elements,
        other => {
            let reason = format!("Expected JSON array, found {}", json_kind(&other));
            warn!("{}", reason);
            return Err(AuditError::parse(reason, raw));
        }
    };

    let mut records = Vec::with_capacity(elements.len());
    for (idx, element) in elements.into_iter().enumerate() {
        let record: DiscrepancyRecord = serde_json::from_value(element).map_err(|e| {
            warn!("Record {} does not match the expected shape: {}", idx, e);
            AuditError::parse(format!("Record {}: {}", idx, e), raw)
        })?;
        records.push(record);
    }

    debug!("Parsed {} records", records.len());
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use ucp_audit_domain::{Category, Status, NOTHING_TO_COMPARE};

    const CATEGORIES: [Category; 3] = [Category::Identity, Category::Logistics, Category::Product];
    const STATUSES: [Status; 3] = [Status::Match, Status::Discrepancy, Status::NotComparable];

    const TWO_RECORDS: &str = r#"[
        {
            "category": "Identity",
            "field": "Applicant",
            "requirement": "ACME TRADING LTD",
            "found_value": "ACME TRADING LTD",
            "status": "MATCH",
            "ucp_ref": "Art. 14(d)"
        },
        {
            "category": "Logistics",
            "field": "Port of Loading",
            "requirement": "Shanghai",
            "found_value": "Ningbo",
            "status": "DISCREPANCY",
            "ucp_ref": "Art. 20(a)(iii)"
        }
    ]"#;

    #[test]
    fn test_parse_valid_response() {
        let records = parse_model_response(TWO_RECORDS).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].category, Category::Identity);
        assert_eq!(records[0].field, "Applicant");
        assert_eq!(records[0].status, Status::Match);

        assert_eq!(records[1].category, Category::Logistics);
        assert_eq!(records[1].found_value, "Ningbo");
        assert_eq!(records[1].status, Status::Discrepancy);
        assert_eq!(records[1].ucp_ref, "Art. 20(a)(iii)");
    }

    #[test]
    fn test_parse_preserves_order_and_values() {
        let records = parse_model_response(TWO_RECORDS).unwrap();
        let reserialized = serde_json::to_string(&records).unwrap();
        let again = parse_model_response(&reserialized).unwrap();
        assert_eq!(records, again);
    }

    #[test]
    fn test_parse_empty_array() {
        let records = parse_model_response("  []\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_null_found_value_is_absent() {
        let raw = r#"[{"category":"Product","field":"Description","requirement":"Steel pipes",
            "found_value":null,"status":"NOT_COMPARABLE","ucp_ref":"Art. 18(c)"}]"#;
        let records = parse_model_response(raw).unwrap();
        assert_eq!(records[0].found_value, NOTHING_TO_COMPARE);
        assert!(records[0].is_absent());
    }

    #[test]
    fn test_parse_not_json() {
        let err = parse_model_response("not json at all").unwrap_err();
        assert!(matches!(err, AuditError::Parse { .. }));
        assert_eq!(err.raw_response(), Some("not json at all"));
    }

    #[test]
    fn test_parse_object_is_not_array() {
        let raw = r#"{"status": "MATCH"}"#;
        match parse_model_response(raw) {
            Err(AuditError::Parse { reason, raw_response }) => {
                assert!(reason.contains("an object"));
                assert_eq!(raw_response, raw);
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_markdown_fence_rejected() {
        let raw = "```json\n[]\n```";
        let err = parse_model_response(raw).unwrap_err();
        assert_eq!(err.raw_response(), Some(raw));
    }

    #[test]
    fn test_parse_unknown_status_names_index() {
        let raw = r#"[
            {"category":"Identity","field":"A","requirement":"x","found_value":"x","status":"MATCH","ucp_ref":"14"},
            {"category":"Identity","field":"B","requirement":"x","found_value":"y","status":"MAYBE","ucp_ref":"14"}
        ]"#;
        match parse_model_response(raw) {
            Err(AuditError::Parse { reason, .. }) => assert!(reason.starts_with("Record 1:")),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_key_rejected() {
        let raw = r#"[{"category":"Identity","field":"A","requirement":"x","status":"MATCH","ucp_ref":"14"}]"#;
        let err = parse_model_response(raw).unwrap_err();
        assert!(err.to_string().contains("Record 0"));
    }

    #[test]
    fn test_parse_unknown_key_rejected() {
        let raw = r#"[{"category":"Identity","field":"A","requirement":"x","found_value":"x",
            "status":"MATCH","ucp_ref":"14","severity":"high"}]"#;
        assert!(parse_model_response(raw).is_err());
    }

    #[test]
    fn test_parse_accepts_loose_status_spelling() {
        let raw = r#"[{"category":"product","field":"Goods","requirement":"x","found_value":"nothing to compare of",
            "status":"not comparable","ucp_ref":"18"}]"#;
        let records = parse_model_response(raw).unwrap();
        assert_eq!(records[0].status, Status::NotComparable);
        assert_eq!(records[0].category, Category::Product);
    }

    fn record_strategy() -> impl Strategy<Value = (usize, String, String, String, usize, String)> {
        (0..3usize, ".{0,40}", ".{0,40}", ".{0,40}", 0..3usize, ".{0,20}")
    }

    fn non_array_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            ".{0,80}",
            any::<i64>().prop_map(|n| n.to_string()),
            "[a-zA-Z ]{0,20}".prop_map(|s| json!({ "status": s }).to_string()),
            ".{0,40}".prop_map(|s| format!("```json\n[{}]\n```", s)),
        ]
    }

    proptest! {
        #[test]
        fn parse_keeps_every_record_in_order(rows in prop::collection::vec(record_strategy(), 0..12)) {
            let raw = serde_json::Value::Array(
                rows.iter()
                    .map(|(category, field, requirement, found, status, ucp_ref)| json!({
                        "category": CATEGORIES[*category].as_str(),
                        "field": field,
                        "requirement": requirement,
                        "found_value": found,
                        "status": STATUSES[*status].as_str(),
                        "ucp_ref": ucp_ref,
                    }))
                    .collect(),
            )
            .to_string();

            let records = parse_model_response(&raw).unwrap();
            prop_assert_eq!(records.len(), rows.len());
            for (record, (category, field, requirement, found, status, ucp_ref)) in records.iter().zip(&rows) {
                prop_assert_eq!(record.category, CATEGORIES[*category]);
                prop_assert_eq!(&record.field, field);
                prop_assert_eq!(&record.requirement, requirement);
                prop_assert_eq!(&record.found_value, found);
                prop_assert_eq!(record.status, STATUSES[*status]);
                prop_assert_eq!(&record.ucp_ref, ucp_ref);
            }
        }

        #[test]
        fn non_array_response_is_parse_error_with_raw_text(raw in non_array_strategy()) {
            prop_assume!(!matches!(serde_json::from_str::<Value>(&raw), Ok(Value::Array(_))));

            let err = parse_model_response(&raw).unwrap_err();
            let is_parse_error = matches!(err, AuditError::Parse { .. });
            prop_assert!(is_parse_error);
            prop_assert_eq!(err.raw_response(), Some(raw.as_str()));
        }
    }
}
