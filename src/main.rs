mod cli_arguments;

use std::{path::Path, sync::Arc};

use anyhow::{Context, bail};
use clap::Parser;
use migraine_tracker::{
    analytics,
    config::BackendProfile,
    consultation::{ChatCompletionClient, ConsultationPanel, Provider},
    http_client::{http_client::HttpClient, reqwest_http_client::ReqwestHttpClient},
    json_client::TimedJsonClient,
    session::{
        ClinicSession, Session,
        sample::{fallback_consultation, sample_patients, sample_sessions},
    },
    session_api::{
        ClinicApi, HostedSessionStore, RestSessionStore, SessionStore, sessions_or_sample,
    },
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli_arguments::{CliArguments, Command, SessionsCommand};

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid session file {}", path.display()))
}

fn session_store(client: &TimedJsonClient) -> Box<dyn SessionStore> {
    match client.config().profile() {
        BackendProfile::Rest => Box::new(RestSessionStore::new(client.clone())),
        BackendProfile::Hosted { .. } => Box::new(HostedSessionStore::new(client.clone())),
    }
}

fn chat_client(
    http_client: &Arc<dyn HttpClient>,
    provider: Provider,
    base_url: &str,
    api_key: Option<&str>,
    args: &CliArguments,
) -> anyhow::Result<ChatCompletionClient> {
    let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
        bail!("No API key configured for {}", provider.label());
    };

    Ok(ChatCompletionClient::connect(
        http_client.clone(),
        provider,
        base_url,
        api_key,
        args.timeout(),
    )?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: CliArguments = CliArguments::parse();
    let config = args.client_config()?;
    if let Err(reason) = args.check_backend() {
        bail!(reason);
    }

    info!(
        "Using {} with a {} ms deadline",
        config.base_url(),
        args.timeout_ms
    );

    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::default());
    let client = TimedJsonClient::new(http_client.clone(), config);
    let clinic = ClinicApi::new(client.clone());

    match &args.command {
        Command::Sessions(SessionsCommand::List { patient: None }) => {
            let store = session_store(&client);
            let (sessions, from_sample) = sessions_or_sample(store.as_ref()).await;
            if from_sample {
                warn!("Showing sample sessions");
            }
            print_json(&sessions)?;
        }
        Command::Sessions(SessionsCommand::List {
            patient: Some(patient),
        }) => {
            let sessions = RestSessionStore::new(client.clone())
                .sessions_by_patient(patient)
                .await?;
            print_json(&sessions)?;
        }
        Command::Sessions(SessionsCommand::Save { file }) => {
            let session: Session = read_json(file)?;
            let saved = session_store(&client).save_session(&session).await?;
            info!("Saved session {:?}", saved.id);
            print_json(&saved)?;
        }
        Command::Sessions(SessionsCommand::Delete { id }) => {
            session_store(&client).delete_session(*id).await?;
            info!("Deleted session {id}");
        }
        Command::Consult { file } => {
            let session: Session = read_json(file)?;
            let reply = RestSessionStore::new(client.clone())
                .consult_ai(&session)
                .await?;
            println!("{}\n", reply.deepseek.display_text());
            println!("{}", reply.openai.display_text());
        }
        Command::ConsultDirect { file } => {
            let session: Session = read_json(file)?;
            let panel = ConsultationPanel::new(
                chat_client(
                    &http_client,
                    Provider::ClinicalAnalysis,
                    &args.deepseek_url,
                    args.deepseek_key.as_deref(),
                    &args,
                )?,
                chat_client(
                    &http_client,
                    Provider::PredictiveAnalysis,
                    &args.openai_url,
                    args.openai_key.as_deref(),
                    &args,
                )?,
            );

            for reply in panel.consult(&session).await {
                println!("== {}\n{}\n", reply.provider.label(), reply.display_text());
            }
        }
        Command::ClinicConsult { file } => {
            let mut session: ClinicSession = read_json(file)?;
            let consultation = match clinic.consult(&session).await {
                Ok(consultation) => consultation,
                Err(err) => {
                    warn!("Consultation failed ({err}), using fallback opinions");
                    fallback_consultation()
                }
            };
            consultation.apply_to(&mut session);
            print_json(&session)?;
        }
        Command::ClinicSave { file } => {
            let session: ClinicSession = read_json(file)?;
            let saved = clinic.save_session(&session).await?;
            info!("Saved clinic session {:?}", saved.id);
            print_json(&saved)?;
        }
        Command::Patients => match clinic.patients().await {
            Ok(patients) => print_json(&patients)?,
            Err(err) => {
                warn!("Could not load patients ({err}), using sample data");
                print_json(&sample_patients())?;
            }
        },
        Command::PatientSessions { patient_id } => {
            print_json(&clinic.patient_sessions(*patient_id).await?)?;
        }
        Command::Treatments => print_json(&clinic.treatments().await?)?,
        Command::Analytics {
            patient_id: Some(patient_id),
            ..
        } => {
            let sessions = clinic.patient_sessions(*patient_id).await?;
            print_json(&json!({
                "sessions": sessions.len(),
                "averagePainIntensity": analytics::average_pain_intensity(&sessions),
                "averageQualityOfLife": analytics::average_quality_of_life(&sessions),
                "kpiEvolution": analytics::clinic_kpi_evolution(&sessions),
                "migraineTypes": analytics::migraine_type_distribution(&sessions),
                "aiConfidence": analytics::ai_confidence_comparison(&sessions),
            }))?;
        }
        Command::Analytics {
            sample,
            patient_id: None,
        } => {
            let sessions = if *sample {
                sample_sessions()
            } else {
                sessions_or_sample(session_store(&client).as_ref()).await.0
            };
            print_json(&json!({
                "summary": analytics::summary(&sessions),
                "progress": analytics::progress_series(&sessions),
                "kpiEvolution": analytics::kpi_evolution(&sessions),
                "diagnoses": analytics::diagnosis_distribution(&sessions),
                "aiVotes": analytics::ai_vote_distribution(&sessions),
            }))?;
        }
    }

    Ok(())
}
