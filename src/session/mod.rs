pub mod clinic;
pub mod consultation_reply;
pub mod sample;
#[allow(clippy::module_inception)]
pub mod session;

pub use clinic::{ClinicKpis, ClinicSession, Patient, PrescribedTreatment, Treatment};
pub use consultation_reply::{AiOpinion, BackendConsultation, ClinicConsultation, ProviderReply};
pub use session::{Kpis, Session};
