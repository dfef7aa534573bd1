use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand, ValueEnum};
use migraine_tracker::{
    config::{BackendProfile, ClientConfig, ConfigError, DEFAULT_API_URL, DEFAULT_MAX_RETRIES},
    consultation::provider::{DEEPSEEK_BASE_URL, OPENAI_BASE_URL},
};

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub(crate) struct CliArguments {
    #[arg(short, long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Deadline for every request, in milliseconds.
    #[arg(short, long, env = "API_TIMEOUT_MS", default_value_t = 30_000)]
    pub timeout_ms: u64,

    #[arg(short, long, value_enum, default_value_t = Backend::Rest)]
    pub backend: Backend,

    #[arg(long, env = "HOSTED_DB_KEY")]
    pub hosted_key: Option<String>,

    /// Accepted but not used: requests are never retried.
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub deepseek_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_key: Option<String>,

    #[arg(long, default_value = DEEPSEEK_BASE_URL)]
    pub deepseek_url: String,

    #[arg(long, default_value = OPENAI_BASE_URL)]
    pub openai_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Backend {
    Rest,
    Hosted,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Follow-up sessions of the single-table flow.
    #[command(subcommand)]
    Sessions(SessionsCommand),

    /// Ask the backend's consultation endpoint about a session file.
    Consult { file: PathBuf },

    /// Ask both chat-completion providers about a session file.
    ConsultDirect { file: PathBuf },

    /// Ask the clinic consultation endpoint about a clinic session file and
    /// print the session with both opinions applied.
    ClinicConsult { file: PathBuf },

    /// Create or update a clinic session from a file.
    ClinicSave { file: PathBuf },

    Patients,

    PatientSessions { patient_id: i64 },

    Treatments,

    /// Chart data for the stored sessions.
    Analytics {
        /// Use the built-in sample sessions instead of the backend.
        #[arg(long)]
        sample: bool,

        /// Chart a patient's sessions from the clinic flow instead.
        #[arg(long, conflicts_with = "sample")]
        patient_id: Option<i64>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionsCommand {
    List {
        #[arg(short, long)]
        patient: Option<String>,
    },
    Save {
        file: PathBuf,
    },
    Delete {
        id: i64,
    },
}

impl Command {
    /// Name of the command when it only exists on the custom REST backend.
    pub fn rest_only_name(&self) -> Option<&'static str> {
        match self {
            Command::Sessions(SessionsCommand::List { patient: Some(_) }) => {
                Some("sessions list --patient")
            }
            Command::Consult { .. } => Some("consult"),
            _ => None,
        }
    }
}

impl CliArguments {
    /// Rejects commands the selected backend has no endpoint for.
    pub fn check_backend(&self) -> Result<(), String> {
        match (self.backend, self.command.rest_only_name()) {
            (Backend::Hosted, Some(name)) => Err(format!(
                "`{name}` is not supported by the hosted backend, use --backend rest"
            )),
            _ => Ok(()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn profile(&self) -> BackendProfile {
        match self.backend {
            Backend::Rest => BackendProfile::Rest,
            Backend::Hosted => BackendProfile::Hosted {
                api_key: self.hosted_key.clone().unwrap_or_default(),
            },
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        Ok(ClientConfig::new(&self.api_url, self.timeout())?
            .with_profile(self.profile())?
            .with_max_retries(self.max_retries))
    }
}
