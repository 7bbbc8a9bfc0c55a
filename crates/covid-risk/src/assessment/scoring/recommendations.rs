use serde::{Deserialize, Serialize};

use super::super::domain::Questionnaire;

/// Canned advice appended to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    UrgentConsultation,
    RestrictContacts,
    ConsultPhysician,
    AvoidCrowds,
    VaccinateCovid,
    VaccinateFlu,
    VaccinatePneumococcal,
    QuitSmoking,
    ReduceAlcohol,
    StartExercising,
    ManageStress,
    NormalizeSleep,
    HygieneAndDistancing,
    VentilateRooms,
    ContinuePrevention,
}

impl Recommendation {
    pub const fn message(self) -> &'static str {
        match self {
            Self::UrgentConsultation => "Consult a doctor urgently!",
            Self::RestrictContacts => "Restrict contact with other people as much as possible",
            Self::ConsultPhysician => "A consultation with a doctor is recommended",
            Self::AvoidCrowds => "Avoid crowded places and wear a mask",
            Self::VaccinateCovid => "Get vaccinated against COVID-19 as soon as possible",
            Self::VaccinateFlu => "Influenza vaccination is recommended",
            Self::VaccinatePneumococcal => "Pneumococcal vaccination is recommended",
            Self::QuitSmoking => "Quitting smoking is strongly recommended",
            Self::ReduceAlcohol => "Limit alcohol consumption",
            Self::StartExercising => "Start regular physical exercise",
            Self::ManageStress => "Practice relaxation and stress reduction techniques",
            Self::NormalizeSleep => "Normalize your sleep schedule (7-9 hours daily)",
            Self::HygieneAndDistancing => "Keep up hand hygiene and social distancing",
            Self::VentilateRooms => "Ventilate rooms regularly",
            Self::ContinuePrevention => "Keep following preventive measures",
        }
    }
}

/// Builds the advice list by appending in a fixed sequence.
pub(crate) fn recommend(score: i32, questionnaire: &Questionnaire) -> Vec<Recommendation> {
    let factors = &questionnaire.factors;
    let mut recommendations = Vec::new();

    if score >= 10 {
        recommendations.push(Recommendation::UrgentConsultation);
        recommendations.push(Recommendation::RestrictContacts);
    } else if score >= 6 {
        recommendations.push(Recommendation::ConsultPhysician);
        recommendations.push(Recommendation::AvoidCrowds);
    }

    if !factors.covid_vaccine {
        recommendations.push(Recommendation::VaccinateCovid);
    }
    if !factors.flu_vaccine {
        recommendations.push(Recommendation::VaccinateFlu);
    }
    if !factors.pneumococcal_vaccine && (factors.lung_disease || questionnaire.age >= 65) {
        recommendations.push(Recommendation::VaccinatePneumococcal);
    }

    let lifestyle = [
        (factors.smoking, Recommendation::QuitSmoking),
        (factors.alcohol_abuse, Recommendation::ReduceAlcohol),
        (factors.sedentary, Recommendation::StartExercising),
        (factors.chronic_stress, Recommendation::ManageStress),
        (factors.sleep_disorder, Recommendation::NormalizeSleep),
    ];
    recommendations.extend(
        lifestyle
            .into_iter()
            .filter(|(applies, _)| *applies)
            .map(|(_, recommendation)| recommendation),
    );

    recommendations.push(Recommendation::HygieneAndDistancing);
    recommendations.push(Recommendation::VentilateRooms);

    if score < 3 {
        recommendations.push(Recommendation::ContinuePrevention);
    }

    recommendations
}
