//! Built-in records shown when the backend cannot be reached.

use crate::session::{
    clinic::Patient,
    consultation_reply::{AiOpinion, ClinicConsultation},
    session::{Kpis, Session},
};

pub fn sample_sessions() -> Vec<Session> {
    vec![
        Session {
            id: Some(1),
            patient: "María González".to_string(),
            date: "2024-11-15".to_string(),
            kpis: Kpis {
                frequency: 3,
                intensity: 7,
                duration: 4.0,
                triggers: "Stress, lack of sleep".to_string(),
                medication: "Ibuprofen 600mg".to_string(),
            },
            diagnosis: "Moderate episodic migraine with partial response to treatment".to_string(),
            progress: 45,
            ai_vote: None,
            ai_vote_reason: None,
        },
        Session {
            id: Some(2),
            patient: "María González".to_string(),
            date: "2024-11-22".to_string(),
            kpis: Kpis {
                frequency: 2,
                intensity: 5,
                duration: 3.0,
                triggers: "Weather changes".to_string(),
                medication: "Ibuprofen 600mg + Sumatriptan".to_string(),
            },
            diagnosis: "Marked improvement, continue current treatment".to_string(),
            progress: 65,
            ai_vote: Some("DeepSeek".to_string()),
            ai_vote_reason: None,
        },
    ]
}

pub fn sample_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: 1,
            code: "P001".to_string(),
            full_name: "María González".to_string(),
            gender: Some("Femenino".to_string()),
            birth_date: Some("1985-05-15".to_string()),
            email: Some("maria@example.com".to_string()),
            phone: Some("999888777".to_string()),
        },
        Patient {
            id: 2,
            code: "P002".to_string(),
            full_name: "Juan Pérez".to_string(),
            gender: Some("Masculino".to_string()),
            birth_date: Some("1990-08-22".to_string()),
            email: Some("juan@example.com".to_string()),
            phone: Some("999777666".to_string()),
        },
    ]
}

/// Opinions displayed when the consultation endpoint fails.
pub fn fallback_consultation() -> ClinicConsultation {
    ClinicConsultation {
        ia1: Some(AiOpinion {
            diagnosis: Some("Episodic migraine based on the reported symptoms".to_string()),
            treatment: Some("Consider preventive treatment if frequency exceeds 4/month".to_string()),
            confidence: Some(0.85),
        }),
        ia2: Some(AiOpinion {
            diagnosis: Some("Migraine pattern with a moderate trend".to_string()),
            treatment: Some("Trigger management and pharmacological therapy".to_string()),
            confidence: Some(0.78),
        }),
    }
}
