use async_trait::async_trait;
use tracing::info;
use url::form_urlencoded;

use crate::{
    json_client::{JsonRequest, TimedJsonClient},
    session::{BackendConsultation, Session},
    session_api::{api_error::ApiError, session_store::SessionStore},
};

/// Session endpoints of the custom REST backend.
#[derive(Clone)]
pub struct RestSessionStore {
    client: TimedJsonClient,
}

impl RestSessionStore {
    pub fn new(client: TimedJsonClient) -> Self {
        Self { client }
    }

    pub async fn sessions_by_patient(&self, patient: &str) -> Result<Vec<Session>, ApiError> {
        let path = format!("/sessions/patient/{}", encode_path_segment(patient));
        Ok(self.client.send_as(JsonRequest::get(path)).await?)
    }

    pub async fn create_session(&self, session: &Session) -> Result<Session, ApiError> {
        let body = serde_json::to_value(session)?;
        let created: Session = self
            .client
            .send_as(JsonRequest::post("/sessions", body))
            .await?;
        info!("Created session {:?}", created.id);
        Ok(created)
    }

    pub async fn update_session(&self, id: i64, session: &Session) -> Result<Session, ApiError> {
        let body = serde_json::to_value(session)?;
        let updated = self
            .client
            .send_as(JsonRequest::put(format!("/sessions/{id}"), body))
            .await?;
        info!("Updated session {id}");
        Ok(updated)
    }

    /// Asks the backend to consult both models about `session`.
    pub async fn consult_ai(&self, session: &Session) -> Result<BackendConsultation, ApiError> {
        let body = serde_json::to_value(session)?;
        Ok(self
            .client
            .send_as(JsonRequest::post("/ai/consult", body))
            .await?)
    }
}

#[async_trait]
impl SessionStore for RestSessionStore {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        Ok(self.client.send_as(JsonRequest::get("/sessions")).await?)
    }

    async fn save_session(&self, session: &Session) -> Result<Session, ApiError> {
        match session.id {
            Some(id) if session.is_persisted() => self.update_session(id, session).await,
            _ => self.create_session(session).await,
        }
    }

    async fn delete_session(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .send(JsonRequest::delete(format!("/sessions/{id}")))
            .await?;
        info!("Deleted session {id}");
        Ok(())
    }
}

/// Percent-encodes one path segment the way browsers encode URI components.
fn encode_path_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use bytes::Bytes;
    use chrono::NaiveDate;

    use crate::{
        config::ClientConfig,
        http_client::{
            http_client::MockHttpClient,
            request::{RequestHeaders, RequestMethod},
            response::Response,
        },
        json_client::{ClientError, TimedJsonClient},
        session::Session,
        session_api::{
            api_error::ApiError,
            rest_session_store::{RestSessionStore, encode_path_segment},
            session_store::SessionStore,
        },
    };

    const SAVED: &str = r#"{"id":12,"patient":"Ana","date":"2024-11-15","progress":30}"#;
    const SAVED_LIST: &str = r#"[{"id":12,"patient":"Ana Ruiz","date":"2024-11-15"}]"#;

    fn response(status: u16, body: &'static str) -> Response {
        Response {
            status,
            headers: RequestHeaders::default(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    fn store(mock: MockHttpClient) -> RestSessionStore {
        let config = ClientConfig::new("http://localhost:3000/api", Duration::from_secs(5)).unwrap();
        RestSessionStore::new(TimedJsonClient::new(Arc::new(mock), config))
    }

    fn draft() -> Session {
        let mut session = Session::blank(NaiveDate::from_ymd_opt(2024, 11, 15).unwrap());
        session.patient = "Ana".to_string();
        session
    }

    #[test]
    fn encodes_patient_names_as_path_segments() {
        assert_eq!(encode_path_segment("María González"), "Mar%C3%ADa%20Gonz%C3%A1lez");
        assert_eq!(encode_path_segment("a/b+c"), "a%2Fb%2Bc");
    }

    #[tokio::test]
    async fn lists_sessions_of_one_patient() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| {
                request.method == RequestMethod::Get
                    && request.url == "http://localhost:3000/api/sessions/patient/Ana%20Ruiz"
            })
            .times(1)
            .returning(|_| Ok(response(200, SAVED_LIST)));

        let sessions = store(mock).sessions_by_patient("Ana Ruiz").await.unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, Some(12));
    }

    #[tokio::test]
    async fn drafts_are_created_with_post() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| {
                request.method == RequestMethod::Post
                    && request.url == "http://localhost:3000/api/sessions"
            })
            .times(1)
            .returning(|_| Ok(response(201, SAVED)));

        let mut session = draft();
        session.id = Some(1_731_628_800_000);

        let saved = store(mock).save_session(&session).await.unwrap();
        assert_eq!(saved.id, Some(12));
    }

    #[tokio::test]
    async fn persisted_sessions_are_updated_with_put() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| {
                request.method == RequestMethod::Put
                    && request.url == "http://localhost:3000/api/sessions/12"
            })
            .times(1)
            .returning(|_| Ok(response(200, SAVED)));

        let mut session = draft();
        session.id = Some(12);

        let saved = store(mock).save_session(&session).await.unwrap();
        assert_eq!(saved.progress, 30);
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| {
                request.method == RequestMethod::Delete
                    && request.url == "http://localhost:3000/api/sessions/12"
            })
            .times(1)
            .returning(|_| Ok(response(204, "")));

        store(mock).delete_session(12).await.unwrap();
    }

    #[tokio::test]
    async fn backend_errors_reach_the_caller_untouched() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Ok(response(404, r#"{"error":"Sesión no encontrada"}"#)));

        let err = store(mock).delete_session(99).await.unwrap_err();

        assert_eq!(
            err.client_error(),
            Some(&ClientError::HttpError {
                status: 404,
                message: "Sesión no encontrada".to_string()
            })
        );
        assert!(matches!(err, ApiError::Request(_)));
    }

    #[tokio::test]
    async fn consults_both_models_through_the_backend() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| request.url.ends_with("/ai/consult"))
            .returning(|_| {
                Ok(response(
                    200,
                    r#"{"deepseek":"Clinical view","openai":{"error":true,"message":"timeout"}}"#,
                ))
            });

        let reply = store(mock).consult_ai(&draft()).await.unwrap();

        assert_eq!(reply.deepseek.display_text(), "Clinical view");
        assert_eq!(reply.openai.display_text(), "Error: timeout");
    }
}
