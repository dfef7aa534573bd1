//! Records of the patient → session → treatment flow.
//!
//! Field names on the wire are the backend's own; Rust names are mapped with
//! `serde(rename)`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    #[serde(rename = "codigo_paciente", default)]
    pub code: String,
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    #[serde(rename = "genero", default)]
    pub gender: Option<String>,
    #[serde(rename = "fecha_nacimiento", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "correo_electronico", default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Symptoms {
    #[serde(rename = "dolor_cabeza", default)]
    pub headache: String,
    #[serde(rename = "nauseas", default)]
    pub nausea: bool,
    #[serde(rename = "fotofobia", default)]
    pub photophobia: bool,
    #[serde(rename = "fonofobia", default)]
    pub phonophobia: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triggers {
    #[serde(rename = "estres", default)]
    pub stress: bool,
    #[serde(rename = "falta_sueno", default)]
    pub lack_of_sleep: bool,
    #[serde(rename = "alimentos", default)]
    pub foods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentMedication {
    /// Opaque entries; the backend has used both plain names and objects.
    #[serde(rename = "medicamentos", default)]
    pub medications: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicKpis {
    #[serde(rename = "intensidad_dolor", default)]
    pub pain_intensity: u32,
    #[serde(rename = "frecuencia_episodios", default)]
    pub episode_frequency: u32,
    #[serde(rename = "duracion_horas", default)]
    pub duration_hours: f64,
    #[serde(rename = "nivel_discapacidad", default)]
    pub disability_level: String,
    #[serde(rename = "puntaje_calidad_vida", default)]
    pub quality_of_life_score: u32,
    #[serde(rename = "dias_trabajo_perdidos", default)]
    pub lost_work_days: u32,
    #[serde(rename = "calidad_sueno", default)]
    pub sleep_quality: u32,
}

impl Default for ClinicKpis {
    fn default() -> Self {
        Self {
            pain_intensity: 5,
            episode_frequency: 0,
            duration_hours: 0.0,
            disability_level: "Moderado".to_string(),
            quality_of_life_score: 5,
            lost_work_days: 0,
            sleep_quality: 3,
        }
    }
}

/// Catalogue entry the clinician can prescribe from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: i64,
    #[serde(rename = "nombre_tratamiento")]
    pub name: String,
    #[serde(rename = "dosis_comun", default)]
    pub common_dose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescribedTreatment {
    #[serde(rename = "tratamiento_id")]
    pub treatment_id: i64,
    #[serde(rename = "nombre_tratamiento")]
    pub name: String,
    #[serde(rename = "dosis_prescrita", default)]
    pub dose: String,
    #[serde(rename = "frecuencia_prescrita", default)]
    pub frequency: String,
    #[serde(rename = "duracion_dias", default)]
    pub duration_days: u32,
    #[serde(rename = "es_tratamiento_final", default)]
    pub is_final: bool,
}

pub const DEFAULT_PRESCRIPTION_FREQUENCY: &str = "Según indicación";
pub const DEFAULT_PRESCRIPTION_DAYS: u32 = 30;

impl From<&Treatment> for PrescribedTreatment {
    fn from(treatment: &Treatment) -> Self {
        Self {
            treatment_id: treatment.id,
            name: treatment.name.clone(),
            dose: treatment.common_dose.clone().unwrap_or_default(),
            frequency: DEFAULT_PRESCRIPTION_FREQUENCY.to_string(),
            duration_days: DEFAULT_PRESCRIPTION_DAYS,
            is_final: false,
        }
    }
}

/// A follow-up record of the patient flow, including both AI opinions once a
/// consultation has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "paciente_id")]
    pub patient_id: i64,
    #[serde(rename = "fecha_sesion")]
    pub session_date: String,
    #[serde(rename = "tipo_sesion", default)]
    pub session_type: String,
    #[serde(rename = "sintomas", default)]
    pub symptoms: Symptoms,
    #[serde(rename = "desencadenantes", default)]
    pub triggers: Triggers,
    #[serde(rename = "medicacion_actual", default)]
    pub current_medication: CurrentMedication,
    #[serde(rename = "tipo_migrana", default)]
    pub migraine_type: String,
    #[serde(rename = "aura_presente", default)]
    pub aura_present: bool,
    #[serde(rename = "condicion_cronica", default)]
    pub chronic_condition: bool,
    #[serde(rename = "diagnostico_final", default)]
    pub final_diagnosis: String,
    #[serde(default)]
    pub kpis: ClinicKpis,
    #[serde(rename = "tratamientos_prescritos", default)]
    pub prescribed_treatments: Vec<PrescribedTreatment>,
    #[serde(rename = "diagnostico_ia_1", default, skip_serializing_if = "Option::is_none")]
    pub ai1_diagnosis: Option<String>,
    #[serde(rename = "tratamiento_ia_1", default, skip_serializing_if = "Option::is_none")]
    pub ai1_treatment: Option<String>,
    #[serde(rename = "confianza_ia_1", default, skip_serializing_if = "Option::is_none")]
    pub ai1_confidence: Option<f64>,
    #[serde(rename = "diagnostico_ia_2", default, skip_serializing_if = "Option::is_none")]
    pub ai2_diagnosis: Option<String>,
    #[serde(rename = "tratamiento_ia_2", default, skip_serializing_if = "Option::is_none")]
    pub ai2_treatment: Option<String>,
    #[serde(rename = "confianza_ia_2", default, skip_serializing_if = "Option::is_none")]
    pub ai2_confidence: Option<f64>,
}

impl ClinicSession {
    pub fn blank(patient_id: i64, today: NaiveDate) -> Self {
        Self {
            id: None,
            patient_id,
            session_date: today.format("%Y-%m-%d").to_string(),
            session_type: "Seguimiento".to_string(),
            symptoms: Symptoms::default(),
            triggers: Triggers::default(),
            current_medication: CurrentMedication::default(),
            migraine_type: String::new(),
            aura_present: false,
            chronic_condition: false,
            final_diagnosis: String::new(),
            kpis: ClinicKpis::default(),
            prescribed_treatments: Vec::new(),
            ai1_diagnosis: None,
            ai1_treatment: None,
            ai1_confidence: None,
            ai2_diagnosis: None,
            ai2_treatment: None,
            ai2_confidence: None,
        }
    }

    pub fn add_treatment(&mut self, treatment: &Treatment) {
        self.prescribed_treatments
            .push(PrescribedTreatment::from(treatment));
    }

    /// Out-of-range indexes leave the list untouched.
    pub fn remove_treatment(&mut self, index: usize) {
        if index < self.prescribed_treatments.len() {
            self.prescribed_treatments.remove(index);
        }
    }

    /// Marks the treatment at `index` as the final one and clears the flag on
    /// every other prescription.
    pub fn set_final_treatment(&mut self, index: usize) {
        for (i, treatment) in self.prescribed_treatments.iter_mut().enumerate() {
            treatment.is_final = i == index;
        }
    }

    pub fn final_treatment(&self) -> Option<&PrescribedTreatment> {
        self.prescribed_treatments.iter().find(|t| t.is_final)
    }
}
