use crate::session::Kpis;

pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// The two chat-completion models a session can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Clinical diagnosis and treatment recommendations.
    ClinicalAnalysis,
    /// Predictive view: likelihood of improvement and risk factors.
    PredictiveAnalysis,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::ClinicalAnalysis => "DeepSeek (clinical analysis)",
            Provider::PredictiveAnalysis => "OpenAI (predictive analysis)",
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            Provider::ClinicalAnalysis => "deepseek-chat",
            Provider::PredictiveAnalysis => "gpt-4",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::ClinicalAnalysis => DEEPSEEK_BASE_URL,
            Provider::PredictiveAnalysis => OPENAI_BASE_URL,
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Provider::ClinicalAnalysis => {
                "You are a medical assistant specialised in neurology and migraine treatment. \
                 Give precise clinical analyses and evidence-based recommendations."
            }
            Provider::PredictiveAnalysis => {
                "You are an AI system specialised in predictive analysis of migraine. \
                 Use statistical reasoning to give predictions and recommendations."
            }
        }
    }

    pub fn user_prompt(&self, kpis: &Kpis) -> String {
        let asks = match self {
            Provider::ClinicalAnalysis => {
                "1. Clinical diagnosis\n2. Pattern analysis\n3. Treatment recommendations"
            }
            Provider::PredictiveAnalysis => {
                "1. Predictive analysis\n2. Probability of improvement\n\
                 3. Identified risk factors\n4. Personalised recommendations"
            }
        };

        format!(
            "Analyse the following data from a migraine patient:\n\
             - Frequency: {} episodes/month\n\
             - Intensity: {}/10\n\
             - Duration: {} hours\n\
             - Triggers: {}\n\
             - Current medication: {}\n\n\
             Provide:\n{}",
            kpis.frequency, kpis.intensity, kpis.duration, kpis.triggers, kpis.medication, asks
        )
    }
}
