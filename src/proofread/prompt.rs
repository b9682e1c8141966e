//! Request construction for the Gemini `generateContent` endpoint.
//!
//! [`PromptBuilder`] assembles the request body:
//! * the Thai proofreader system instruction,
//! * the user's text as the single user turn, sent verbatim,
//! * a `generationConfig` that forces JSON output matching
//!   [`response_schema`].

use serde_json::{json, Value};

use super::types::ChangeType;

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

/// Thai proofreader persona: fix spelling, grammar and spacing while keeping
/// the author's tone, meaning and intentional slang.
pub const SYSTEM_INSTRUCTION: &str = "\
คุณคือผู้เชี่ยวชาญด้านการพิสูจน์อักษรและบรรณาธิการภาษาไทย (Thai Proofreader & Editor) หน้าที่ของคุณคือตรวจสอบข้อความที่ได้รับและแก้ไขให้ถูกต้องตามหลักภาษา โดยยังคงน้ำเสียง (Tone) และสไตล์การเขียนเดิมของผู้เขียนไว้

กฎการทำงาน:
1. แก้ไขคำผิด (Spelling errors)
2. แก้ไขไวยากรณ์ (Grammar) และการเรียงประโยคที่สับสน
3. ปรับการเว้นวรรค (Spacing) ให้ถูกต้องตามหลักภาษาไทย
4. ห้ามเปลี่ยนความหมายเดิมของข้อความ
5. หากเป็นคำสแลงหรือภาษาพูดที่ตั้งใจใช้เพื่ออรรถรส ให้คงไว้ (ยกเว้นกรณีที่พิมพ์ผิดจริงๆ)";

/// MIME type requested for the model output.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

// ---------------------------------------------------------------------------
// Response schema
// ---------------------------------------------------------------------------

/// OpenAPI-subset schema describing [`ProofreadResult`](super::ProofreadResult).
///
/// Every change item requires all four fields; the top level requires
/// `original_text`, `corrected_text`, `changes` and `overall_comment`.
pub fn response_schema() -> Value {
    let change_types: Vec<&str> = ChangeType::ALL.iter().map(ChangeType::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "original_text":   { "type": "STRING" },
            "corrected_text":  { "type": "STRING" },
            "overall_comment": { "type": "STRING" },
            "changes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "original":    { "type": "STRING" },
                        "corrected":   { "type": "STRING" },
                        "type":        { "type": "STRING", "enum": change_types },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["original", "corrected", "type", "explanation"]
                }
            }
        },
        "required": ["original_text", "corrected_text", "changes", "overall_comment"]
    })
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds `generateContent` request bodies.
///
/// # Example
/// ```rust
/// use thai_proofreader::proofread::PromptBuilder;
///
/// let body = PromptBuilder::new(None).build("ภาษาไทยง่ายนิดเดียว");
/// assert_eq!(body["contents"][0]["parts"][0]["text"], "ภาษาไทยง่ายนิดเดียว");
/// assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    temperature: Option<f32>,
}

impl PromptBuilder {
    /// `temperature` is only sent when `Some`.
    pub fn new(temperature: Option<f32>) -> Self {
        Self { temperature }
    }

    /// Build the JSON request body for `text`.
    pub fn build(&self, text: &str) -> Value {
        let mut generation_config = json!({
            "responseMimeType": RESPONSE_MIME_TYPE,
            "responseSchema":   response_schema(),
        });
        if let Some(t) = self.temperature {
            generation_config["temperature"] = json!(t);
        }

        json!({
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "contents": [{
                "role":  "user",
                "parts": [{ "text": text }]
            }],
            "generationConfig": generation_config
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
