//! プロンプト定義
//!
//! CLIとWeb(WASM)で共有される解析指示文

/// 植物・雑穀・豆類の同定とアーユルヴェーダ情報を求める固定指示
pub const ANALYSIS_PROMPT: &str = r#"You are an expert botanist, Ayurvedic practitioner and nutritionist.

Analyze the attached photo. It should show a medicinal plant, a leaf, a millet or a pulse.

1. Identify it. Set "identified" to true only if you are confident AND can give its common name.
   If the photo shows something else, or you are not confident, set "identified" to false.
2. When identified, provide:
   - commonName, botanicalName (binomial), ayurvedicName (Sanskrit name if any), family
   - shortDescription: two or three sentences on appearance and traditional importance
   - medicinalUses: traditional and evidence-informed uses, most important first
   - preparationMethods: home preparations (decoction, paste, powder, porridge...) with clear instructions
   - dosage: general guidance for children, adults and elderly
   - safetyWarnings: contraindications, interactions, pregnancy and allergy notes
   - ayurvedicProperties: rasa (taste), virya (potency), vipaka (post-digestive effect), doshaKarma (effect on Vata, Pitta, Kapha)
   For millets and pulses, include nutritional highlights in shortDescription and medicinalUses.
3. confidenceScore: 0-100, your certainty of the identification.
4. safetyProfileScore: 1 (toxic) to 10 (very safe for general use).

Respond only with JSON that matches the provided schema. Never invent a name for an unidentified subject."#;

/// ローディング中に順番に表示する文言（表示専用）
pub const LOADING_STAGES: &[&str] = &[
    "Scanning leaf structure...",
    "Identifying botanical species...",
    "Consulting Ayurvedic texts...",
    "Analyzing nutritional properties...",
    "Compiling safety profile...",
];
