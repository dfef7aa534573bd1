//! Aggregations behind the progress and KPI charts.
//!
//! Every function is pure and total: empty inputs give empty series or zero
//! averages.

use serde::Serialize;

use crate::session::{ClinicSession, Session};

const MIGRAINE_KEYWORDS: [&str; 4] = ["migraña", "migraine", "episodio", "episode"];
const UNSPECIFIED_TYPE: &str = "Unspecified";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub label: String,
    pub date: String,
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiPoint {
    pub label: String,
    pub frequency: u32,
    pub intensity: u32,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicKpiPoint {
    pub label: String,
    pub date: String,
    pub pain_intensity: u32,
    pub episode_frequency: u32,
    pub duration_hours: f64,
    pub quality_of_life: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidencePoint {
    pub label: String,
    pub ai1_percent: u32,
    pub ai2_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub sessions: usize,
    pub average_progress: u32,
    pub average_intensity: f64,
    pub voted_sessions: usize,
}

fn label(index: usize) -> String {
    format!("S{}", index + 1)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn progress_series(sessions: &[Session]) -> Vec<ProgressPoint> {
    sessions
        .iter()
        .enumerate()
        .map(|(i, s)| ProgressPoint {
            label: label(i),
            date: s.date.clone(),
            progress: s.progress,
        })
        .collect()
}

pub fn kpi_evolution(sessions: &[Session]) -> Vec<KpiPoint> {
    sessions
        .iter()
        .enumerate()
        .map(|(i, s)| KpiPoint {
            label: label(i),
            frequency: s.kpis.frequency,
            intensity: s.kpis.intensity,
            duration: s.kpis.duration,
        })
        .collect()
}

fn mentions_migraine(diagnosis: &str) -> bool {
    let diagnosis = diagnosis.to_lowercase();
    MIGRAINE_KEYWORDS.iter().any(|k| diagnosis.contains(k))
}

/// Sessions whose diagnosis mentions a migraine episode against the rest.
pub fn diagnosis_distribution(sessions: &[Session]) -> [Slice; 2] {
    let with_migraine = sessions
        .iter()
        .filter(|s| mentions_migraine(&s.diagnosis))
        .count();

    [
        Slice {
            name: "With migraine".to_string(),
            value: with_migraine,
        },
        Slice {
            name: "Without migraine".to_string(),
            value: sessions.len() - with_migraine,
        },
    ]
}

/// Counts per accepted provider, in order of first appearance.
pub fn ai_vote_distribution(sessions: &[Session]) -> Vec<Slice> {
    count_in_order(sessions.iter().filter_map(|s| s.ai_vote.as_deref()))
}

pub fn voted_sessions(sessions: &[Session]) -> usize {
    sessions.iter().filter(|s| s.ai_vote.is_some()).count()
}

/// Mean progress rounded to a whole percentage.
pub fn average_progress(sessions: &[Session]) -> u32 {
    if sessions.is_empty() {
        return 0;
    }
    let total: u64 = sessions.iter().map(|s| u64::from(s.progress)).sum();
    (total as f64 / sessions.len() as f64).round() as u32
}

/// Mean pain intensity with one decimal.
pub fn average_intensity(sessions: &[Session]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total: f64 = sessions.iter().map(|s| f64::from(s.kpis.intensity)).sum();
    round_one_decimal(total / sessions.len() as f64)
}

pub fn summary(sessions: &[Session]) -> Summary {
    Summary {
        sessions: sessions.len(),
        average_progress: average_progress(sessions),
        average_intensity: average_intensity(sessions),
        voted_sessions: voted_sessions(sessions),
    }
}

pub fn clinic_kpi_evolution(sessions: &[ClinicSession]) -> Vec<ClinicKpiPoint> {
    sessions
        .iter()
        .enumerate()
        .map(|(i, s)| ClinicKpiPoint {
            label: label(i),
            date: s.session_date.clone(),
            pain_intensity: s.kpis.pain_intensity,
            episode_frequency: s.kpis.episode_frequency,
            duration_hours: s.kpis.duration_hours,
            quality_of_life: s.kpis.quality_of_life_score,
        })
        .collect()
}

/// Sessions per migraine type, in order of first appearance. Sessions
/// without a type are grouped as "Unspecified".
pub fn migraine_type_distribution(sessions: &[ClinicSession]) -> Vec<Slice> {
    count_in_order(sessions.iter().map(|s| {
        let migraine_type = s.migraine_type.trim();
        if migraine_type.is_empty() {
            UNSPECIFIED_TYPE
        } else {
            migraine_type
        }
    }))
}

/// Both models' confidence as whole percentages, for sessions where both
/// gave one. Labels count only those sessions.
pub fn ai_confidence_comparison(sessions: &[ClinicSession]) -> Vec<ConfidencePoint> {
    sessions
        .iter()
        .filter_map(|s| match (s.ai1_confidence, s.ai2_confidence) {
            (Some(ai1), Some(ai2)) if ai1 > 0.0 && ai2 > 0.0 => Some((ai1, ai2)),
            _ => None,
        })
        .enumerate()
        .map(|(i, (ai1, ai2))| ConfidencePoint {
            label: label(i),
            ai1_percent: (ai1 * 100.0).round() as u32,
            ai2_percent: (ai2 * 100.0).round() as u32,
        })
        .collect()
}

pub fn average_pain_intensity(sessions: &[ClinicSession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total: f64 = sessions.iter().map(|s| f64::from(s.kpis.pain_intensity)).sum();
    round_one_decimal(total / sessions.len() as f64)
}

pub fn average_quality_of_life(sessions: &[ClinicSession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total: f64 = sessions
        .iter()
        .map(|s| f64::from(s.kpis.quality_of_life_score))
        .sum();
    round_one_decimal(total / sessions.len() as f64)
}

fn count_in_order<'a>(names: impl Iterator<Item = &'a str>) -> Vec<Slice> {
    let mut slices: Vec<Slice> = Vec::new();
    for name in names {
        match slices.iter_mut().find(|slice| slice.name == name) {
            Some(slice) => slice.value += 1,
            None => slices.push(Slice {
                name: name.to_string(),
                value: 1,
            }),
        }
    }
    slices
}
