use serde::{Deserialize, Serialize};

use crate::session::clinic::ClinicSession;

/// What the backend relays from one model: its text, or the reason it failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderReply {
    Text(String),
    Failed {
        #[serde(default)]
        error: bool,
        message: String,
    },
}

impl ProviderReply {
    pub fn display_text(&self) -> String {
        match self {
            ProviderReply::Text(text) => text.clone(),
            ProviderReply::Failed { message, .. } => format!("Error: {message}"),
        }
    }
}

/// Reply of the single-table backend's consultation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConsultation {
    pub deepseek: ProviderReply,
    pub openai: ProviderReply,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiOpinion {
    #[serde(rename = "diagnostico", default)]
    pub diagnosis: Option<String>,
    #[serde(rename = "tratamiento", default)]
    pub treatment: Option<String>,
    /// Between 0 and 1.
    #[serde(rename = "confianza", default)]
    pub confidence: Option<f64>,
}

/// Reply of the patient backend's consultation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicConsultation {
    #[serde(default)]
    pub ia1: Option<AiOpinion>,
    #[serde(default)]
    pub ia2: Option<AiOpinion>,
}

impl ClinicConsultation {
    /// Copies both opinions onto the session, clearing fields a missing
    /// opinion does not provide.
    pub fn apply_to(&self, session: &mut ClinicSession) {
        let ia1 = self.ia1.clone().unwrap_or_default();
        let ia2 = self.ia2.clone().unwrap_or_default();

        session.ai1_diagnosis = ia1.diagnosis;
        session.ai1_treatment = ia1.treatment;
        session.ai1_confidence = ia1.confidence;
        session.ai2_diagnosis = ia2.diagnosis;
        session.ai2_treatment = ia2.treatment;
        session.ai2_confidence = ia2.confidence;
    }
}
