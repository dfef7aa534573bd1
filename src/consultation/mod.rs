pub mod chat_completion_client;
pub mod consultation_error;
pub mod consultation_panel;
pub mod provider;

pub use chat_completion_client::ChatCompletionClient;
pub use consultation_error::ConsultationError;
pub use consultation_panel::{ConsultationPanel, PanelReply};
pub use provider::Provider;
