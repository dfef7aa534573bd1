use tracing::warn;

use crate::{
    consultation::{
        chat_completion_client::ChatCompletionClient, consultation_error::ConsultationError,
        provider::Provider,
    },
    session::Session,
};

/// Outcome of asking one provider.
#[derive(Debug)]
pub struct PanelReply {
    pub provider: Provider,
    pub outcome: Result<String, ConsultationError>,
}

impl PanelReply {
    /// The model's text, or an explanation the clinician can read in its
    /// place.
    pub fn display_text(&self) -> String {
        match &self.outcome {
            Ok(text) => text.clone(),
            Err(err) => format!(
                "Error consulting {}: {err}\n\nUsing fallback analysis...",
                self.provider.label()
            ),
        }
    }
}

/// Queries the clinical and the predictive provider side by side.
pub struct ConsultationPanel {
    clinical: ChatCompletionClient,
    predictive: ChatCompletionClient,
}

impl ConsultationPanel {
    pub fn new(clinical: ChatCompletionClient, predictive: ChatCompletionClient) -> Self {
        Self {
            clinical,
            predictive,
        }
    }

    /// Both calls run concurrently; one failing does not affect the other.
    pub async fn consult(&self, session: &Session) -> [PanelReply; 2] {
        let (clinical, predictive) = tokio::join!(
            self.clinical.consult(session),
            self.predictive.consult(session)
        );

        let replies = [
            PanelReply {
                provider: self.clinical.provider(),
                outcome: clinical,
            },
            PanelReply {
                provider: self.predictive.provider(),
                outcome: predictive,
            },
        ];

        for reply in &replies {
            if let Err(err) = &reply.outcome {
                warn!("{} consultation failed: {err}", reply.provider.label());
            }
        }

        replies
    }
}
