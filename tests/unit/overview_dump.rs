//! Decoding a provider record and dumping it back out

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::Value;
use test_log::test;

use crate::common::fixtures::IBM_OVERVIEW_BODY;
use rust_alphavantage::api::decode_response;
use rust_alphavantage::{dump_json_to_file, to_pretty_json, CompanyOverview};

fn decoded_ibm() -> CompanyOverview {
    decode_response(StatusCode::OK, IBM_OVERVIEW_BODY.as_bytes()).expect("fixture should decode")
}

#[test]
fn test_dump_normalizes_sentinels_to_null() {
    let dumped: Value = serde_json::from_str(&to_pretty_json(&decoded_ibm()).unwrap()).unwrap();

    for field in [
        "PERatio",
        "200DayMovingAverage",
        "SharesFloat",
        "ShortRatio",
        "LastSplitDate",
    ] {
        assert_eq!(dumped[field], Value::Null, "{field} should dump as null");
    }
    // fields this crate does not model are not carried over
    assert!(dumped.get("CIK").is_none());
}

#[test]
fn test_dump_reproduces_present_values() {
    let source: Value = serde_json::from_str(IBM_OVERVIEW_BODY).unwrap();
    let dumped: Value = serde_json::from_str(&to_pretty_json(&decoded_ibm()).unwrap()).unwrap();

    for (key, value) in dumped.as_object().unwrap() {
        let original = &source[key.as_str()];
        match value {
            Value::Null => assert_eq!(original, &Value::String("None".to_string()), "{key}"),
            Value::String(text) => assert_eq!(original.as_str(), Some(text.as_str()), "{key}"),
            Value::Number(number) => {
                let expected: f64 = original.as_str().unwrap().parse().unwrap();
                let rounded = (expected * 100.0).round() / 100.0;
                let got = number.as_f64().unwrap();
                assert!((got - rounded).abs() < 1e-6, "{key}: {number} vs {rounded}");
            }
            other => panic!("unexpected value for {key}: {other}"),
        }
    }
}

#[test]
fn test_dump_text_uses_two_decimals_and_bare_null() {
    let text = to_pretty_json(&decoded_ibm()).unwrap();
    assert!(text.contains("\"MarketCapitalization\": 390000000000.00"));
    assert!(text.contains("\"PERatio\": null"));
    assert!(text.contains("\"LatestQuarter\": \"2024-03-31\""));
    assert!(!text.contains("\"None\""));
}

#[test]
fn test_dump_file_decodes_again() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ibm.json");
    let original = decoded_ibm();

    dump_json_to_file(&path, &original).unwrap();
    let body = std::fs::read(&path).unwrap();
    let reread: CompanyOverview = decode_response(StatusCode::OK, &body).unwrap();

    assert_eq!(reread.symbol, original.symbol);
    assert_eq!(reread.pe_ratio, original.pe_ratio);
    assert_eq!(reread.latest_quarter, original.latest_quarter);
    assert_eq!(reread.market_capitalization, original.market_capitalization);
}
