use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::{
    json_client::{ClientError, JsonRequest, TimedJsonClient},
    session::{Kpis, Session},
    session_api::{api_error::ApiError, session_store::SessionStore},
};

const SESSIONS_TABLE: &str = "/rest/v1/sessions";

/// Sessions stored directly in the hosted database's REST interface.
///
/// Expects a client configured with the hosted profile, which supplies the
/// key headers and asks for the written row back.
#[derive(Clone)]
pub struct HostedSessionStore {
    client: TimedJsonClient,
}

/// Row as the table stores it: snake_case vote columns, no id.
#[derive(Serialize)]
struct SessionRow<'a> {
    patient: &'a str,
    date: &'a str,
    kpis: &'a Kpis,
    diagnosis: &'a str,
    progress: u32,
    ai_vote: Option<&'a str>,
    ai_vote_reason: Option<&'a str>,
}

impl<'a> From<&'a Session> for SessionRow<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            patient: &session.patient,
            date: &session.date,
            kpis: &session.kpis,
            diagnosis: &session.diagnosis,
            progress: session.progress,
            ai_vote: session.ai_vote.as_deref(),
            ai_vote_reason: session.ai_vote_reason.as_deref(),
        }
    }
}

impl HostedSessionStore {
    pub fn new(client: TimedJsonClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionStore for HostedSessionStore {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let path = format!("{SESSIONS_TABLE}?select=*&order=date.desc");
        Ok(self.client.send_as(JsonRequest::get(path)).await?)
    }

    async fn save_session(&self, session: &Session) -> Result<Session, ApiError> {
        let body = serde_json::to_value(SessionRow::from(session))?;

        let request = match session.id {
            Some(id) if session.is_persisted() => {
                JsonRequest::patch(format!("{SESSIONS_TABLE}?id=eq.{id}"), body)
            }
            _ => JsonRequest::post(SESSIONS_TABLE, body),
        };

        let written = self.client.send(request).await?;
        let saved = first_row(written)?;
        info!("Stored session {:?}", saved.id);
        Ok(saved)
    }

    async fn delete_session(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .send(JsonRequest::delete(format!("{SESSIONS_TABLE}?id=eq.{id}")))
            .await?;
        info!("Deleted session {id}");
        Ok(())
    }
}

/// The table answers writes with an array of rows; older deployments return
/// the bare row.
fn first_row(written: Value) -> Result<Session, ClientError> {
    let row = match written {
        Value::Array(rows) => rows.into_iter().next().ok_or_else(|| {
            ClientError::DecodeFailure("write returned no rows".to_string())
        })?,
        other => other,
    };
    serde_json::from_value(row).map_err(|e| ClientError::DecodeFailure(e.to_string()))
}
