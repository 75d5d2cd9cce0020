//! 共有テキスト
//!
//! navigator.share / クリップボード / CLI の `--format share` で使う短い要約。

use crate::types::AnalysisResult;
use crate::view::confidence_percent;

/// 共有文の末尾に付けるタグ
pub const SHARE_TAG: &str = "Identified with Herb Scan";

/// 共有時のタイトル
pub const SHARE_TITLE: &str = "Herb Scan result";

const MAX_SHARED_USES: usize = 3;

pub fn share_text(result: &AnalysisResult) -> String {
    let mut lines = Vec::new();

    match result.display_name() {
        Some(name) if result.identified => match result.botanical_name.as_deref() {
            Some(botanical) if !botanical.trim().is_empty() => {
                lines.push(format!("🌿 {} ({})", name, botanical.trim()))
            }
            _ => lines.push(format!("🌿 {}", name)),
        },
        _ => lines.push("🌿 Identification uncertain".to_string()),
    }

    if result.identified {
        if let Some(name) = non_blank(result.ayurvedic_name.as_deref()) {
            lines.push(format!("Ayurvedic name: {}", name));
        }
        if let Some(family) = non_blank(result.family.as_deref()) {
            lines.push(format!("Family: {}", family));
        }
    }
    lines.push(format!("Confidence: {}%", confidence_percent(result)));

    if result.identified && !result.medicinal_uses.is_empty() {
        let uses: Vec<&str> = result
            .medicinal_uses
            .iter()
            .take(MAX_SHARED_USES)
            .map(String::as_str)
            .collect();
        lines.push(format!("Uses: {}", uses.join(", ")));
    }

    if let Some(warning) = result.safety_warnings.first() {
        if result.identified {
            lines.push(format!("⚠️ {}", warning));
        }
    }

    lines.push(String::new());
    lines.push(SHARE_TAG.to_string());
    lines.join("\n")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_text_identified() {
        let result = AnalysisResult {
            identified: true,
            common_name: Some("Neem".into()),
            botanical_name: Some("Azadirachta indica".into()),
            ayurvedic_name: Some("Nimba".into()),
            medicinal_uses: vec!["Skin".into(), "Fever".into(), "Dental care".into(), "Diabetes".into()],
            safety_warnings: vec!["Not for infants".into(), "Avoid in pregnancy".into()],
            confidence_score: 92,
            ..Default::default()
        };

        let text = share_text(&result);
        assert!(text.starts_with("🌿 Neem (Azadirachta indica)"));
        assert!(text.contains("Ayurvedic name: Nimba"));
        assert!(text.contains("Confidence: 92%"));
        assert!(text.contains("Uses: Skin, Fever, Dental care"));
        assert!(!text.contains("Diabetes"));
        assert!(text.contains("⚠️ Not for infants"));
        assert!(!text.contains("Avoid in pregnancy"));
        assert!(text.ends_with(SHARE_TAG));
        assert!(!text.contains("Family"));
    }

    #[test]
    fn test_share_text_uncertain() {
        let result = AnalysisResult {
            identified: false,
            common_name: Some("Maybe neem".into()),
            medicinal_uses: vec!["Skin".into()],
            confidence_score: 20,
            ..Default::default()
        };

        let text = share_text(&result);
        assert!(text.starts_with("🌿 Identification uncertain"));
        assert!(!text.contains("Maybe neem"));
        assert!(!text.contains("Uses"));
    }
}
