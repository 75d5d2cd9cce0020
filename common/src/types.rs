//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - AnalysisResult: 外部モデルが返す植物プロファイル
//! - PreparationMethod / Dosage / AyurvedicProperties: その構成要素

use serde::{Deserialize, Serialize};

/// 調製法（名前と手順はどちらも必須）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparationMethod {
    pub method_name: String,
    pub instructions: String,
}

/// 年齢層別の用量目安
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosage {
    pub children: String,
    pub adults: String,
    pub elderly: String,
}

/// アーユルヴェーダ的性質
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AyurvedicProperties {
    pub rasa: Option<String>,        // 味
    pub virya: Option<String>,       // 効力
    pub vipaka: Option<String>,      // 消化後の作用
    pub dosha_karma: Option<String>, // ドーシャへの作用
}

/// AI解析結果
///
/// `identified` と `confidenceScore` 以外はすべて欠落しうる。
/// `identified` が真なら `common_name` は空でない（parser::interpret が保証）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub identified: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub botanical_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayurvedic_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(default)]
    pub medicinal_uses: Vec<String>,

    #[serde(default)]
    pub preparation_methods: Vec<PreparationMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<Dosage>,

    #[serde(default)]
    pub safety_warnings: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayurvedic_properties: Option<AyurvedicProperties>,

    pub confidence_score: u8,

    /// 1（有毒）〜10（非常に安全）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_profile_score: Option<u8>,
}

impl AnalysisResult {
    /// 空白のみの名前は未設定として扱う
    pub fn display_name(&self) -> Option<&str> {
        self.common_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_result_default() {
        let result = AnalysisResult::default();
        assert!(!result.identified);
        assert_eq!(result.confidence_score, 0);
        assert!(result.medicinal_uses.is_empty());
    }

    #[test]
    fn test_analysis_result_serialize() {
        let result = AnalysisResult {
            identified: true,
            common_name: Some("Neem".to_string()),
            botanical_name: Some("Azadirachta indica".to_string()),
            confidence_score: 92,
            safety_profile_score: Some(8),
            ..Default::default()
        };

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"identified\":true"));
        assert!(json.contains("\"commonName\":\"Neem\""));
        assert!(json.contains("\"botanicalName\":\"Azadirachta indica\""));
        assert!(json.contains("\"confidenceScore\":92"));
        assert!(json.contains("\"safetyProfileScore\":8"));
        assert!(!json.contains("ayurvedicName"));
    }

    #[test]
    fn test_analysis_result_deserialize_full() {
        let json = r#"{
            "identified": true,
            "commonName": "Tulsi",
            "botanicalName": "Ocimum tenuiflorum",
            "ayurvedicName": "Tulasi",
            "family": "Lamiaceae",
            "shortDescription": "Holy basil.",
            "medicinalUses": ["Cough", "Fever"],
            "preparationMethods": [{"methodName": "Tea", "instructions": "Steep 5 leaves."}],
            "dosage": {"children": "2 leaves", "adults": "5 leaves", "elderly": "3 leaves"},
            "safetyWarnings": ["Avoid during pregnancy"],
            "ayurvedicProperties": {"rasa": "Katu, Tikta", "virya": "Ushna", "vipaka": "Katu", "doshaKarma": "Kapha-Vata shamaka"},
            "confidenceScore": 88,
            "safetyProfileScore": 9
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.common_name.as_deref(), Some("Tulsi"));
        assert_eq!(result.medicinal_uses, vec!["Cough", "Fever"]);
        assert_eq!(result.preparation_methods[0].method_name, "Tea");
        assert_eq!(result.dosage.as_ref().map(|d| d.adults.as_str()), Some("5 leaves"));
        let props = result.ayurvedic_properties.expect("性質がない");
        assert_eq!(props.dosha_karma.as_deref(), Some("Kapha-Vata shamaka"));
        assert_eq!(result.safety_profile_score, Some(9));
    }

    #[test]
    fn test_analysis_result_deserialize_minimal() {
        let json = r#"{"identified": false, "confidenceScore": 20}"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(!result.identified);
        assert_eq!(result.confidence_score, 20);
        assert_eq!(result.common_name, None);
        assert!(result.safety_warnings.is_empty());
        assert_eq!(result.dosage, None);
    }

    #[test]
    fn test_required_fields_are_enforced() {
        assert!(serde_json::from_str::<AnalysisResult>(r#"{"confidenceScore": 20}"#).is_err());
        assert!(serde_json::from_str::<AnalysisResult>(r#"{"identified": true}"#).is_err());
    }

    #[test]
    fn test_preparation_method_requires_both_fields() {
        let json = r#"{"identified": true, "confidenceScore": 50,
            "preparationMethods": [{"methodName": "Paste"}]}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_dosage_requires_all_groups() {
        let json = r#"{"identified": true, "confidenceScore": 50,
            "dosage": {"adults": "1 tsp"}}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_display_name_ignores_blank() {
        let mut result = AnalysisResult {
            common_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(result.display_name(), None);

        result.common_name = Some(" Ashwagandha ".to_string());
        assert_eq!(result.display_name(), Some("Ashwagandha"));
    }
}
