//! APIレスポンスパーサー
//!
//! モデルの出力テキストからJSONを取り出し、AnalysisResult に厳密にパースした上で
//! 整合性補正（同定済みなのに名前が無い → 未同定）をかける。

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// APIレスポンスからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最初の `{` から最後の `}` まで
/// 3. エラー
///
/// # Examples
/// ```
/// use herb_scan_common::extract_json;
///
/// let response = "Result: {\"identified\": false, \"confidenceScore\": 5}";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSON object not found".into()))
}

/// レスポンスをパースして補正済みの AnalysisResult を返す
///
/// 形が合わない場合（必須フィールド欠落・型違い）はすべて Parse エラー
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    if response.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }

    let json_str = extract_json(response)?;
    let raw: AnalysisResult = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("analysis JSON: {}", e)))?;

    Ok(interpret(raw))
}

/// 整合性補正
///
/// `identified` が真でも名前が空なら未同定に倒す。モデルの自己申告は信用しない
pub fn interpret(mut result: AnalysisResult) -> AnalysisResult {
    if result.identified && result.display_name().is_none() {
        tracing::warn!(
            confidence = result.confidence_score,
            "model marked result as identified without a common name; downgrading"
        );
        result.identified = false;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // extract_json テスト
    // =============================================

    #[test]
    fn test_extract_json_with_block() {
        let response = "Here is the analysis:\n```json\n{\"identified\": true}\n```\nThanks.";
        assert_eq!(extract_json(response).unwrap(), "{\"identified\": true}");
    }

    #[test]
    fn test_extract_json_raw() {
        let response = r#"{"identified": false, "confidenceScore": 3}"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"Result: {"a": {"b": 1}} done."#;
        assert_eq!(extract_json(response).unwrap(), r#"{"a": {"b": 1}}"#);
    }

    #[test]
    fn test_extract_json_error() {
        let result = extract_json("No JSON here, just plain text.");
        match result {
            Err(Error::Parse(msg)) => assert!(msg.contains("not found")),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    // =============================================
    // parse_analysis_response テスト
    // =============================================

    #[test]
    fn test_parse_identified() {
        let response = r#"{
            "identified": true,
            "commonName": "Neem",
            "botanicalName": "Azadirachta indica",
            "medicinalUses": ["Skin disorders", "Blood purification"],
            "confidenceScore": 92,
            "safetyProfileScore": 8
        }"#;

        let result = parse_analysis_response(response).unwrap();
        assert!(result.identified);
        assert_eq!(result.common_name.as_deref(), Some("Neem"));
        assert_eq!(result.medicinal_uses, vec!["Skin disorders", "Blood purification"]);
        assert_eq!(result.confidence_score, 92);
        assert_eq!(result.safety_profile_score, Some(8));
    }

    #[test]
    fn test_identified_without_name_is_downgraded() {
        for response in [
            r#"{"identified": true, "confidenceScore": 70}"#,
            r#"{"identified": true, "commonName": "", "confidenceScore": 70}"#,
            r#"{"identified": true, "commonName": "  ", "botanicalName": "Ocimum", "confidenceScore": 70}"#,
            r#"{"identified": true, "commonName": null, "confidenceScore": 70}"#,
        ] {
            let result = parse_analysis_response(response).unwrap();
            assert!(!result.identified, "{}", response);
        }
    }

    #[test]
    fn test_not_identified_stays_not_identified() {
        let result = parse_analysis_response(
            r#"{"identified": false, "commonName": "Maybe basil", "confidenceScore": 20}"#,
        )
        .unwrap();
        assert!(!result.identified);
        assert_eq!(result.common_name.as_deref(), Some("Maybe basil"));
    }

    #[test]
    fn test_parse_fenced_response() {
        let response = "```json\n{\"identified\": false, \"confidenceScore\": 20}\n```";
        let result = parse_analysis_response(response).unwrap();
        assert!(!result.identified);
        assert_eq!(result.confidence_score, 20);
    }

    #[test]
    fn test_shape_mismatch_is_parse_error() {
        for response in [
            r#"{"commonName": "Neem", "confidenceScore": 92}"#,
            r#"{"identified": "yes", "confidenceScore": 92}"#,
            r#"{"identified": true, "commonName": "Neem"}"#,
            r#"{"identified": true, "commonName": "Neem", "confidenceScore": -4}"#,
            r#"{"identified": true, "commonName": "Neem", "confidenceScore": 50, "medicinalUses": "fever"}"#,
        ] {
            assert!(
                matches!(parse_analysis_response(response), Err(Error::Parse(_))),
                "{}",
                response
            );
        }
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(parse_analysis_response(""), Err(Error::EmptyResponse)));
        assert!(matches!(parse_analysis_response("  \n"), Err(Error::EmptyResponse)));
    }

    #[test]
    fn test_interpret_keeps_valid_result() {
        let result = AnalysisResult {
            identified: true,
            common_name: Some("Ragi".into()),
            confidence_score: 81,
            ..Default::default()
        };
        assert_eq!(interpret(result.clone()), result);
    }
}
