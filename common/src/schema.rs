//! 出力スキーマ
//!
//! Gemini の responseSchema（OpenAPI サブセット）で AnalysisResult の形を指定する。
//! フィールド名は types.rs の serde 表現と一致させること。

use serde_json::{json, Value};

/// 必須フィールド
pub const REQUIRED_FIELDS: &[&str] = &["identified", "confidenceScore"];

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "description": description,
        "items": { "type": "STRING" }
    })
}

/// AnalysisResult のレスポンススキーマ
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "identified": {
                "type": "BOOLEAN",
                "description": "True only when confidently identified as a medicinal plant, millet or pulse"
            },
            "commonName": string("Common English name"),
            "botanicalName": string("Botanical (binomial) name"),
            "ayurvedicName": string("Sanskrit / Ayurvedic name"),
            "family": string("Botanical family"),
            "shortDescription": string("Brief description"),
            "medicinalUses": string_list("Medicinal and nutritional uses"),
            "preparationMethods": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "methodName": string("Name of the preparation"),
                        "instructions": string("How to prepare it")
                    },
                    "required": ["methodName", "instructions"]
                }
            },
            "dosage": {
                "type": "OBJECT",
                "properties": {
                    "children": string("Dosage for children"),
                    "adults": string("Dosage for adults"),
                    "elderly": string("Dosage for the elderly")
                },
                "required": ["children", "adults", "elderly"]
            },
            "safetyWarnings": string_list("Safety warnings and contraindications"),
            "ayurvedicProperties": {
                "type": "OBJECT",
                "properties": {
                    "rasa": string("Taste"),
                    "virya": string("Potency"),
                    "vipaka": string("Post-digestive effect"),
                    "doshaKarma": string("Effect on Vata, Pitta and Kapha")
                }
            },
            "confidenceScore": {
                "type": "INTEGER",
                "description": "Identification confidence from 0 to 100"
            },
            "safetyProfileScore": {
                "type": "INTEGER",
                "description": "General safety from 1 (toxic) to 10 (very safe)"
            }
        },
        "required": REQUIRED_FIELDS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisResult, AyurvedicProperties, Dosage, PreparationMethod};

    #[test]
    fn test_schema_required_fields() {
        let schema = response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"], json!(["identified", "confidenceScore"]));
    }

    #[test]
    fn test_schema_nested_required_fields() {
        let schema = response_schema();
        let props = &schema["properties"];
        assert_eq!(props["preparationMethods"]["items"]["required"], json!(["methodName", "instructions"]));
        assert_eq!(props["dosage"]["required"], json!(["children", "adults", "elderly"]));
        assert!(props["ayurvedicProperties"].get("required").is_none());
    }

    #[test]
    fn test_schema_types() {
        let props = response_schema()["properties"].clone();
        assert_eq!(props["identified"]["type"], "BOOLEAN");
        assert_eq!(props["confidenceScore"]["type"], "INTEGER");
        assert_eq!(props["safetyProfileScore"]["type"], "INTEGER");
        assert_eq!(props["medicinalUses"]["type"], "ARRAY");
        assert_eq!(props["medicinalUses"]["items"]["type"], "STRING");
    }

    /// スキーマのプロパティ名が型のシリアライズ結果と一致していること
    #[test]
    fn test_schema_matches_serialized_fields() {
        let full = AnalysisResult {
            identified: true,
            common_name: Some("x".into()),
            botanical_name: Some("x".into()),
            ayurvedic_name: Some("x".into()),
            family: Some("x".into()),
            short_description: Some("x".into()),
            medicinal_uses: vec!["x".into()],
            preparation_methods: vec![PreparationMethod {
                method_name: "x".into(),
                instructions: "x".into(),
            }],
            dosage: Some(Dosage {
                children: "x".into(),
                adults: "x".into(),
                elderly: "x".into(),
            }),
            safety_warnings: vec!["x".into()],
            ayurvedic_properties: Some(AyurvedicProperties {
                rasa: Some("x".into()),
                virya: Some("x".into()),
                vipaka: Some("x".into()),
                dosha_karma: Some("x".into()),
            }),
            confidence_score: 1,
            safety_profile_score: Some(1),
        };

        let serialized = serde_json::to_value(&full).unwrap();
        let schema = response_schema();

        let mut fields: Vec<_> = serialized.as_object().unwrap().keys().cloned().collect();
        let mut props: Vec<_> = schema["properties"].as_object().unwrap().keys().cloned().collect();
        fields.sort();
        props.sort();
        assert_eq!(fields, props);

        let mut inner: Vec<_> = serialized["ayurvedicProperties"].as_object().unwrap().keys().cloned().collect();
        let mut inner_props: Vec<_> = schema["properties"]["ayurvedicProperties"]["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        inner.sort();
        inner_props.sort();
        assert_eq!(inner, inner_props);
    }
}
