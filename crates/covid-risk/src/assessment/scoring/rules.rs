use super::super::domain::{Questionnaire, RiskFactor};
use super::{ScoreComponent, ScoreSource};

/// Age brackets, highest threshold first; only the first match counts.
const AGE_BRACKETS: [(i32, i32); 4] = [(65, 4), (50, 3), (40, 2), (30, 1)];

/// BMI brackets, highest threshold first; only the first match counts.
const BMI_BRACKETS: [(f64, i32); 3] = [(40.0, 3), (35.0, 2), (30.0, 1)];

pub(crate) fn age_points(age: i32) -> i32 {
    AGE_BRACKETS
        .iter()
        .find(|(threshold, _)| age >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

pub(crate) fn bmi_points(bmi: f64) -> i32 {
    BMI_BRACKETS
        .iter()
        .find(|(threshold, _)| bmi >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Signed weight of a factor. Vaccinations are negative.
pub const fn factor_weight(factor: RiskFactor) -> i32 {
    match factor {
        RiskFactor::Diabetes => 3,
        RiskFactor::Hypertension => 2,
        RiskFactor::Cardiovascular => 3,
        RiskFactor::LungDisease => 3,
        RiskFactor::KidneyDisease => 3,
        RiskFactor::LiverDisease => 2,
        RiskFactor::Cancer => 4,
        RiskFactor::Autoimmune => 2,
        RiskFactor::PrimaryImmunodeficiency => 4,
        RiskFactor::Hiv => 4,
        RiskFactor::Transplant => 5,
        RiskFactor::SteroidUse => 3,
        RiskFactor::Chemotherapy => 4,
        RiskFactor::CovidVaccine => -3,
        RiskFactor::FluVaccine => -1,
        RiskFactor::PneumococcalVaccine => -1,
        RiskFactor::Smoking => 2,
        RiskFactor::AlcoholAbuse => 1,
        RiskFactor::DrugUse => 2,
        RiskFactor::Sedentary => 1,
        RiskFactor::NoExercise => 1,
        RiskFactor::ChronicStress => 1,
        RiskFactor::Depression => 1,
        RiskFactor::SleepDisorder => 1,
        RiskFactor::InfectedContact => 2,
        RiskFactor::MedicalWork => 2,
        RiskFactor::CrowdExposure => 1,
        RiskFactor::RiskZoneTravel => 1,
        RiskFactor::Pregnancy => 2,
    }
}

pub(crate) fn score_questionnaire(questionnaire: &Questionnaire) -> (Vec<ScoreComponent>, i32) {
    let mut components = Vec::new();
    let mut total_score = 0;

    let age_bracket = age_points(questionnaire.age);
    if age_bracket != 0 {
        components.push(ScoreComponent {
            source: ScoreSource::AgeBracket,
            points: age_bracket,
            note: format!("age {} adds {age_bracket}", questionnaire.age),
        });
        total_score += age_bracket;
    }

    let bmi = questionnaire.bmi();
    let bmi_bracket = bmi_points(bmi);
    if bmi_bracket != 0 {
        components.push(ScoreComponent {
            source: ScoreSource::BmiBracket,
            points: bmi_bracket,
            note: format!("BMI {bmi:.1} adds {bmi_bracket}"),
        });
        total_score += bmi_bracket;
    }

    for factor in questionnaire.factors.present() {
        if factor == RiskFactor::Pregnancy && !questionnaire.is_female() {
            continue;
        }

        let points = factor_weight(factor);
        let note = if points < 0 {
            format!("{} lowers risk by {}", factor.label(), -points)
        } else {
            format!("{} adds {points}", factor.label())
        };
        components.push(ScoreComponent {
            source: ScoreSource::Factor(factor),
            points,
            note,
        });
        total_score += points;
    }

    (components, total_score)
}
