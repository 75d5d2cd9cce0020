//! 表示用の派生値
//!
//! 欠落フィールドのプレースホルダ、信頼度ゲージ、安全性バッジなど。
//! Web と CLI の両方の表示で使う。

use crate::types::AnalysisResult;

/// 欠落フィールドの代替表示
pub const PLACEHOLDER: &str = "Not available";

/// 文字列フィールドの表示値
pub fn text_or_placeholder(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// ゲージ用の信頼度（0〜100に丸める）
pub fn confidence_percent(result: &AnalysisResult) -> u8 {
    result.confidence_score.min(100)
}

/// 安全性スコアの区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyLevel {
    Caution,  // 1-3
    Moderate, // 4-6
    Safe,     // 7-10
    Unknown,
}

impl SafetyLevel {
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            Some(1..=3) => SafetyLevel::Caution,
            Some(4..=6) => SafetyLevel::Moderate,
            Some(s) if s >= 7 => SafetyLevel::Safe,
            _ => SafetyLevel::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SafetyLevel::Caution => "Use with caution",
            SafetyLevel::Moderate => "Moderately safe",
            SafetyLevel::Safe => "Generally safe",
            SafetyLevel::Unknown => "Safety unknown",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SafetyLevel::Caution => "safety-caution",
            SafetyLevel::Moderate => "safety-moderate",
            SafetyLevel::Safe => "safety-safe",
            SafetyLevel::Unknown => "safety-unknown",
        }
    }
}

/// 安全性バーの幅（%）。スコアは1〜10に丸める
pub fn safety_percent(score: Option<u8>) -> u8 {
    score.map(|s| s.clamp(1, 10) * 10).unwrap_or(0)
}

/// テキスト表示（CLIの text 出力）
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();

    if !result.identified {
        out.push_str("Identification Uncertain\n");
        out.push_str(&format!("Confidence: {}%\n", confidence_percent(result)));
        out.push_str(
            "We couldn't confidently identify a medicinal plant, millet or pulse in this photo.\n\
             Try a closer, well-lit photo of a single leaf, grain or seed.\n",
        );
        return out;
    }

    let level = SafetyLevel::from_score(result.safety_profile_score);
    out.push_str(&format!("{}\n", text_or_placeholder(result.display_name())));
    out.push_str(&format!("  Botanical name : {}\n", text_or_placeholder(result.botanical_name.as_deref())));
    out.push_str(&format!("  Ayurvedic name : {}\n", text_or_placeholder(result.ayurvedic_name.as_deref())));
    out.push_str(&format!("  Family         : {}\n", text_or_placeholder(result.family.as_deref())));
    out.push_str(&format!("  Confidence     : {}%\n", confidence_percent(result)));
    match result.safety_profile_score {
        Some(score) => out.push_str(&format!("  Safety         : {}/10 ({})\n", score, level.label())),
        None => out.push_str(&format!("  Safety         : {}\n", level.label())),
    }
    out.push('\n');
    out.push_str(&format!("{}\n", text_or_placeholder(result.short_description.as_deref())));

    let props = result.ayurvedic_properties.clone().unwrap_or_default();
    out.push_str("\nAyurvedic properties\n");
    out.push_str(&format!("  Rasa        : {}\n", text_or_placeholder(props.rasa.as_deref())));
    out.push_str(&format!("  Virya       : {}\n", text_or_placeholder(props.virya.as_deref())));
    out.push_str(&format!("  Vipaka      : {}\n", text_or_placeholder(props.vipaka.as_deref())));
    out.push_str(&format!("  Dosha karma : {}\n", text_or_placeholder(props.dosha_karma.as_deref())));

    push_list(&mut out, "Medicinal uses", &result.medicinal_uses);

    out.push_str("\nPreparation methods\n");
    if result.preparation_methods.is_empty() {
        out.push_str(&format!("  {}\n", PLACEHOLDER));
    }
    for method in &result.preparation_methods {
        out.push_str(&format!("  - {}: {}\n", method.method_name, method.instructions));
    }

    out.push_str("\nDosage\n");
    match &result.dosage {
        Some(d) => {
            out.push_str(&format!("  Children : {}\n", d.children));
            out.push_str(&format!("  Adults   : {}\n", d.adults));
            out.push_str(&format!("  Elderly  : {}\n", d.elderly));
        }
        None => out.push_str(&format!("  {}\n", PLACEHOLDER)),
    }

    push_list(&mut out, "Safety warnings", &result.safety_warnings);
    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("\n{}\n", title));
    if items.is_empty() {
        out.push_str(&format!("  {}\n", PLACEHOLDER));
    }
    for item in items {
        out.push_str(&format!("  - {}\n", item));
    }
}
