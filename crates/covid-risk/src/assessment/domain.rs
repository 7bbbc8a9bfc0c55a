use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub const fn is_female(self) -> bool {
        matches!(self, Self::Female)
    }
}

/// Grouping used when presenting the questionnaire and its weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Chronic,
    Immune,
    Vaccination,
    Lifestyle,
    Psychological,
    Exposure,
    Pregnancy,
}

impl FactorCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chronic => "Chronic disease",
            Self::Immune => "Immune status",
            Self::Vaccination => "Vaccination",
            Self::Lifestyle => "Lifestyle",
            Self::Psychological => "Psychological state",
            Self::Exposure => "Contacts and occupation",
            Self::Pregnancy => "Pregnancy",
        }
    }
}

/// Closed catalogue of the boolean questionnaire factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Diabetes,
    Hypertension,
    Cardiovascular,
    LungDisease,
    KidneyDisease,
    LiverDisease,
    Cancer,
    Autoimmune,
    PrimaryImmunodeficiency,
    Hiv,
    Transplant,
    SteroidUse,
    Chemotherapy,
    CovidVaccine,
    FluVaccine,
    PneumococcalVaccine,
    Smoking,
    AlcoholAbuse,
    DrugUse,
    Sedentary,
    NoExercise,
    ChronicStress,
    Depression,
    SleepDisorder,
    InfectedContact,
    MedicalWork,
    CrowdExposure,
    RiskZoneTravel,
    Pregnancy,
}

impl RiskFactor {
    pub const ALL: [Self; 29] = [
        Self::Diabetes,
        Self::Hypertension,
        Self::Cardiovascular,
        Self::LungDisease,
        Self::KidneyDisease,
        Self::LiverDisease,
        Self::Cancer,
        Self::Autoimmune,
        Self::PrimaryImmunodeficiency,
        Self::Hiv,
        Self::Transplant,
        Self::SteroidUse,
        Self::Chemotherapy,
        Self::CovidVaccine,
        Self::FluVaccine,
        Self::PneumococcalVaccine,
        Self::Smoking,
        Self::AlcoholAbuse,
        Self::DrugUse,
        Self::Sedentary,
        Self::NoExercise,
        Self::ChronicStress,
        Self::Depression,
        Self::SleepDisorder,
        Self::InfectedContact,
        Self::MedicalWork,
        Self::CrowdExposure,
        Self::RiskZoneTravel,
        Self::Pregnancy,
    ];

    /// Stable snake_case key used by the CLI and JSON payloads.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Hypertension => "hypertension",
            Self::Cardiovascular => "cardiovascular",
            Self::LungDisease => "lung_disease",
            Self::KidneyDisease => "kidney_disease",
            Self::LiverDisease => "liver_disease",
            Self::Cancer => "cancer",
            Self::Autoimmune => "autoimmune",
            Self::PrimaryImmunodeficiency => "primary_immunodeficiency",
            Self::Hiv => "hiv",
            Self::Transplant => "transplant",
            Self::SteroidUse => "steroid_use",
            Self::Chemotherapy => "chemotherapy",
            Self::CovidVaccine => "covid_vaccine",
            Self::FluVaccine => "flu_vaccine",
            Self::PneumococcalVaccine => "pneumococcal_vaccine",
            Self::Smoking => "smoking",
            Self::AlcoholAbuse => "alcohol_abuse",
            Self::DrugUse => "drug_use",
            Self::Sedentary => "sedentary",
            Self::NoExercise => "no_exercise",
            Self::ChronicStress => "chronic_stress",
            Self::Depression => "depression",
            Self::SleepDisorder => "sleep_disorder",
            Self::InfectedContact => "infected_contact",
            Self::MedicalWork => "medical_work",
            Self::CrowdExposure => "crowd_exposure",
            Self::RiskZoneTravel => "risk_zone_travel",
            Self::Pregnancy => "pregnancy",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes mellitus",
            Self::Hypertension => "Arterial hypertension",
            Self::Cardiovascular => "Cardiovascular disease",
            Self::LungDisease => "Chronic lung disease",
            Self::KidneyDisease => "Chronic kidney disease",
            Self::LiverDisease => "Chronic liver disease",
            Self::Cancer => "Oncological disease",
            Self::Autoimmune => "Autoimmune disease",
            Self::PrimaryImmunodeficiency => "Primary immunodeficiency",
            Self::Hiv => "HIV/AIDS",
            Self::Transplant => "Organ transplant",
            Self::SteroidUse => "Long-term corticosteroid use",
            Self::Chemotherapy => "Chemotherapy",
            Self::CovidVaccine => "COVID-19 vaccination",
            Self::FluVaccine => "Influenza vaccination",
            Self::PneumococcalVaccine => "Pneumococcal vaccination",
            Self::Smoking => "Smoking",
            Self::AlcoholAbuse => "Alcohol abuse",
            Self::DrugUse => "Drug use",
            Self::Sedentary => "Sedentary lifestyle",
            Self::NoExercise => "No regular physical activity",
            Self::ChronicStress => "Chronic stress",
            Self::Depression => "Depression",
            Self::SleepDisorder => "Sleep disorder",
            Self::InfectedContact => "Contact with COVID-19 patients",
            Self::MedicalWork => "Work in healthcare",
            Self::CrowdExposure => "Frequent time in crowded places",
            Self::RiskZoneTravel => "Recent travel to risk zones",
            Self::Pregnancy => "Pregnancy",
        }
    }

    pub const fn category(self) -> FactorCategory {
        match self {
            Self::Diabetes
            | Self::Hypertension
            | Self::Cardiovascular
            | Self::LungDisease
            | Self::KidneyDisease
            | Self::LiverDisease
            | Self::Cancer
            | Self::Autoimmune => FactorCategory::Chronic,
            Self::PrimaryImmunodeficiency
            | Self::Hiv
            | Self::Transplant
            | Self::SteroidUse
            | Self::Chemotherapy => FactorCategory::Immune,
            Self::CovidVaccine | Self::FluVaccine | Self::PneumococcalVaccine => {
                FactorCategory::Vaccination
            }
            Self::Smoking
            | Self::AlcoholAbuse
            | Self::DrugUse
            | Self::Sedentary
            | Self::NoExercise => FactorCategory::Lifestyle,
            Self::ChronicStress | Self::Depression | Self::SleepDisorder => {
                FactorCategory::Psychological
            }
            Self::InfectedContact
            | Self::MedicalWork
            | Self::CrowdExposure
            | Self::RiskZoneTravel => FactorCategory::Exposure,
            Self::Pregnancy => FactorCategory::Pregnancy,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|factor| factor.key() == normalized)
    }
}

/// Fixed set of questionnaire flags; anything not answered is `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskFactors {
    pub diabetes: bool,
    pub hypertension: bool,
    pub cardiovascular: bool,
    pub lung_disease: bool,
    pub kidney_disease: bool,
    pub liver_disease: bool,
    pub cancer: bool,
    pub autoimmune: bool,
    pub primary_immunodeficiency: bool,
    pub hiv: bool,
    pub transplant: bool,
    pub steroid_use: bool,
    pub chemotherapy: bool,
    pub covid_vaccine: bool,
    pub flu_vaccine: bool,
    pub pneumococcal_vaccine: bool,
    pub smoking: bool,
    pub alcohol_abuse: bool,
    pub drug_use: bool,
    pub sedentary: bool,
    pub no_exercise: bool,
    pub chronic_stress: bool,
    pub depression: bool,
    pub sleep_disorder: bool,
    pub infected_contact: bool,
    pub medical_work: bool,
    pub crowd_exposure: bool,
    pub risk_zone_travel: bool,
    pub pregnancy: bool,
}

impl RiskFactors {
    pub fn from_keys<I, S>(keys: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut factors = Self::default();
        for key in keys {
            let key = key.as_ref();
            let factor = RiskFactor::from_key(key)
                .ok_or_else(|| ValidationError::UnknownFactor(key.to_string()))?;
            factors.set(factor, true);
        }
        Ok(factors)
    }

    pub fn with(mut self, factor: RiskFactor) -> Self {
        self.set(factor, true);
        self
    }

    pub fn is_set(&self, factor: RiskFactor) -> bool {
        *self.slot(factor)
    }

    pub fn set(&mut self, factor: RiskFactor, value: bool) {
        *self.slot_mut(factor) = value;
    }

    /// Set factors in catalogue order.
    pub fn present(&self) -> Vec<RiskFactor> {
        RiskFactor::ALL
            .into_iter()
            .filter(|factor| self.is_set(*factor))
            .collect()
    }

    fn slot(&self, factor: RiskFactor) -> &bool {
        match factor {
            RiskFactor::Diabetes => &self.diabetes,
            RiskFactor::Hypertension => &self.hypertension,
            RiskFactor::Cardiovascular => &self.cardiovascular,
            RiskFactor::LungDisease => &self.lung_disease,
            RiskFactor::KidneyDisease => &self.kidney_disease,
            RiskFactor::LiverDisease => &self.liver_disease,
            RiskFactor::Cancer => &self.cancer,
            RiskFactor::Autoimmune => &self.autoimmune,
            RiskFactor::PrimaryImmunodeficiency => &self.primary_immunodeficiency,
            RiskFactor::Hiv => &self.hiv,
            RiskFactor::Transplant => &self.transplant,
            RiskFactor::SteroidUse => &self.steroid_use,
            RiskFactor::Chemotherapy => &self.chemotherapy,
            RiskFactor::CovidVaccine => &self.covid_vaccine,
            RiskFactor::FluVaccine => &self.flu_vaccine,
            RiskFactor::PneumococcalVaccine => &self.pneumococcal_vaccine,
            RiskFactor::Smoking => &self.smoking,
            RiskFactor::AlcoholAbuse => &self.alcohol_abuse,
            RiskFactor::DrugUse => &self.drug_use,
            RiskFactor::Sedentary => &self.sedentary,
            RiskFactor::NoExercise => &self.no_exercise,
            RiskFactor::ChronicStress => &self.chronic_stress,
            RiskFactor::Depression => &self.depression,
            RiskFactor::SleepDisorder => &self.sleep_disorder,
            RiskFactor::InfectedContact => &self.infected_contact,
            RiskFactor::MedicalWork => &self.medical_work,
            RiskFactor::CrowdExposure => &self.crowd_exposure,
            RiskFactor::RiskZoneTravel => &self.risk_zone_travel,
            RiskFactor::Pregnancy => &self.pregnancy,
        }
    }

    fn slot_mut(&mut self, factor: RiskFactor) -> &mut bool {
        match factor {
            RiskFactor::Diabetes => &mut self.diabetes,
            RiskFactor::Hypertension => &mut self.hypertension,
            RiskFactor::Cardiovascular => &mut self.cardiovascular,
            RiskFactor::LungDisease => &mut self.lung_disease,
            RiskFactor::KidneyDisease => &mut self.kidney_disease,
            RiskFactor::LiverDisease => &mut self.liver_disease,
            RiskFactor::Cancer => &mut self.cancer,
            RiskFactor::Autoimmune => &mut self.autoimmune,
            RiskFactor::PrimaryImmunodeficiency => &mut self.primary_immunodeficiency,
            RiskFactor::Hiv => &mut self.hiv,
            RiskFactor::Transplant => &mut self.transplant,
            RiskFactor::SteroidUse => &mut self.steroid_use,
            RiskFactor::Chemotherapy => &mut self.chemotherapy,
            RiskFactor::CovidVaccine => &mut self.covid_vaccine,
            RiskFactor::FluVaccine => &mut self.flu_vaccine,
            RiskFactor::PneumococcalVaccine => &mut self.pneumococcal_vaccine,
            RiskFactor::Smoking => &mut self.smoking,
            RiskFactor::AlcoholAbuse => &mut self.alcohol_abuse,
            RiskFactor::DrugUse => &mut self.drug_use,
            RiskFactor::Sedentary => &mut self.sedentary,
            RiskFactor::NoExercise => &mut self.no_exercise,
            RiskFactor::ChronicStress => &mut self.chronic_stress,
            RiskFactor::Depression => &mut self.depression,
            RiskFactor::SleepDisorder => &mut self.sleep_disorder,
            RiskFactor::InfectedContact => &mut self.infected_contact,
            RiskFactor::MedicalWork => &mut self.medical_work,
            RiskFactor::CrowdExposure => &mut self.crowd_exposure,
            RiskFactor::RiskZoneTravel => &mut self.risk_zone_travel,
            RiskFactor::Pregnancy => &mut self.pregnancy,
        }
    }
}

/// Completed questionnaire handed to the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub factors: RiskFactors,
}

impl Questionnaire {
    pub fn new(
        age: i32,
        weight_kg: f64,
        height_cm: f64,
        sex: Sex,
        factors: RiskFactors,
    ) -> Result<Self, ValidationError> {
        let questionnaire = Self {
            age,
            weight_kg,
            height_cm,
            sex,
            factors,
        };
        questionnaire.validate()?;
        Ok(questionnaire)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.age < 0 {
            return Err(ValidationError::NegativeAge(self.age));
        }
        check_measurement(MeasurementField::WeightKg, self.weight_kg)?;
        check_measurement(MeasurementField::HeightCm, self.height_cm)?;
        Ok(())
    }

    /// Derived on every call; never cached.
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }

    pub fn is_female(&self) -> bool {
        self.sex.is_female()
    }
}

fn check_measurement(field: MeasurementField, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(())
}

/// Questionnaire as collected by a form: measurements are still raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireForm {
    #[serde(default, deserialize_with = "deserialize_form_value")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "deserialize_form_value")]
    pub weight_kg: Option<String>,
    #[serde(default, deserialize_with = "deserialize_form_value")]
    pub height_cm: Option<String>,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub factors: RiskFactors,
}

impl TryFrom<QuestionnaireForm> for Questionnaire {
    type Error = ValidationError;

    fn try_from(form: QuestionnaireForm) -> Result<Self, Self::Error> {
        let age_raw = required(MeasurementField::Age, form.age.as_deref())?;
        let age = age_raw
            .parse::<i32>()
            .map_err(|_| ValidationError::NotNumeric {
                field: MeasurementField::Age,
                value: age_raw.to_string(),
            })?;
        let weight_kg = parse_decimal(MeasurementField::WeightKg, form.weight_kg.as_deref())?;
        let height_cm = parse_decimal(MeasurementField::HeightCm, form.height_cm.as_deref())?;

        Questionnaire::new(age, weight_kg, height_cm, form.sex, form.factors)
    }
}

fn required(field: MeasurementField, raw: Option<&str>) -> Result<&str, ValidationError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::Missing { field }),
    }
}

fn parse_decimal(field: MeasurementField, raw: Option<&str>) -> Result<f64, ValidationError> {
    let value = required(field, raw)?;
    let parsed = value
        .parse::<f64>()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: value.to_string(),
        })?;
    if !parsed.is_finite() {
        return Err(ValidationError::NotNumeric {
            field,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FormValue {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_form_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<FormValue>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        FormValue::Text(text) => text,
        FormValue::Number(number) => number.to_string(),
    }))
}

/// Full name of the person the assessment belongs to; at least two words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectName(String);

impl SubjectName {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.len() < 2 {
            return Err(ValidationError::IncompleteName(raw.trim().to_string()));
        }
        Ok(Self(words.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submission storing an assessment against a named subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub subject: String,
    pub questionnaire: QuestionnaireForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementField {
    Age,
    WeightKg,
    HeightCm,
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Age => "age",
            Self::WeightKg => "weight_kg",
            Self::HeightCm => "height_cm",
        };
        f.write_str(name)
    }
}

/// Rejected questionnaire input; scoring never runs on these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: MeasurementField },
    #[error("{field} must be a number, got '{value}'")]
    NotNumeric {
        field: MeasurementField,
        value: String,
    },
    #[error("age must not be negative, got {0}")]
    NegativeAge(i32),
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: MeasurementField, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: MeasurementField },
    #[error("unknown risk factor '{0}'")]
    UnknownFactor(String),
    #[error("full name must contain at least two words, got '{0}'")]
    IncompleteName(String),
}
