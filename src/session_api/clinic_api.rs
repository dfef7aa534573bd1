use serde::Serialize;
use tracing::info;

use crate::{
    json_client::{JsonRequest, TimedJsonClient},
    session::{
        ClinicConsultation, ClinicKpis, ClinicSession, Patient, Treatment,
        clinic::{CurrentMedication, Symptoms, Triggers},
    },
    session_api::api_error::ApiError,
};

/// Endpoints of the patient → session → treatment backend.
#[derive(Clone)]
pub struct ClinicApi {
    client: TimedJsonClient,
}

/// The clinical picture sent for consultation; identity fields stay local.
#[derive(Serialize)]
struct ConsultationRequest<'a> {
    #[serde(rename = "sintomas")]
    symptoms: &'a Symptoms,
    #[serde(rename = "desencadenantes")]
    triggers: &'a Triggers,
    #[serde(rename = "medicacion_actual")]
    current_medication: &'a CurrentMedication,
    kpis: &'a ClinicKpis,
    #[serde(rename = "tipo_migrana")]
    migraine_type: &'a str,
}

impl<'a> From<&'a ClinicSession> for ConsultationRequest<'a> {
    fn from(session: &'a ClinicSession) -> Self {
        Self {
            symptoms: &session.symptoms,
            triggers: &session.triggers,
            current_medication: &session.current_medication,
            kpis: &session.kpis,
            migraine_type: &session.migraine_type,
        }
    }
}

impl ClinicApi {
    pub fn new(client: TimedJsonClient) -> Self {
        Self { client }
    }

    pub async fn patients(&self) -> Result<Vec<Patient>, ApiError> {
        Ok(self.client.send_as(JsonRequest::get("/pacientes")).await?)
    }

    pub async fn patient_sessions(&self, patient_id: i64) -> Result<Vec<ClinicSession>, ApiError> {
        let path = format!("/sesiones/paciente/{patient_id}");
        Ok(self.client.send_as(JsonRequest::get(path)).await?)
    }

    pub async fn treatments(&self) -> Result<Vec<Treatment>, ApiError> {
        Ok(self.client.send_as(JsonRequest::get("/tratamientos")).await?)
    }

    /// PUT when the session has an id, POST otherwise.
    pub async fn save_session(&self, session: &ClinicSession) -> Result<ClinicSession, ApiError> {
        let body = serde_json::to_value(session)?;
        let request = match session.id {
            Some(id) => JsonRequest::put(format!("/sesiones/{id}"), body),
            None => JsonRequest::post("/sesiones", body),
        };

        let saved: ClinicSession = self.client.send_as(request).await?;
        info!(
            "Saved session {:?} for patient {}",
            saved.id, saved.patient_id
        );
        Ok(saved)
    }

    pub async fn consult(&self, session: &ClinicSession) -> Result<ClinicConsultation, ApiError> {
        let body = serde_json::to_value(ConsultationRequest::from(session))?;
        Ok(self
            .client
            .send_as(JsonRequest::post("/ia/consultar", body))
            .await?)
    }
}
