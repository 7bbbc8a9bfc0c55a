use crate::infra::build_repository;
use clap::Args;
use covid_risk::assessment::{
    score, AssessmentRecord, AssessmentSubmission, Questionnaire, QuestionnaireForm,
    RiskAssessmentService, RiskFactor, RiskFactors, RiskResult, Sex, SubjectName,
};
use covid_risk::config::HistoryConfig;
use covid_risk::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Age in full years
    #[arg(long)]
    pub(crate) age: String,
    /// Body weight in kilograms
    #[arg(long = "weight")]
    pub(crate) weight_kg: String,
    /// Height in centimetres
    #[arg(long = "height")]
    pub(crate) height_cm: String,
    /// Respondent is female (enables the pregnancy factor)
    #[arg(long)]
    pub(crate) female: bool,
    /// Risk factor key, repeatable (e.g. --factor diabetes --factor covid_vaccine)
    #[arg(long = "factor", value_name = "KEY")]
    pub(crate) factors: Vec<String>,
    /// Full name of the respondent, shown in the report header
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Keep at most this many assessments in the demo history.
    #[arg(long)]
    pub(crate) capacity: Option<usize>,
    /// Number of history entries to print (defaults to all).
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        age,
        weight_kg,
        height_cm,
        female,
        factors,
        name,
        json,
    } = args;

    let subject = name.as_deref().map(SubjectName::parse).transpose()?;
    let form = QuestionnaireForm {
        age: Some(age),
        weight_kg: Some(weight_kg),
        height_cm: Some(height_cm),
        sex: if female { Sex::Female } else { Sex::Male },
        factors: RiskFactors::from_keys(&factors)?,
    };

    let questionnaire = Questionnaire::try_from(form)?;
    let result = score(&questionnaire)?;

    if json {
        let payload = serde_json::to_string_pretty(&result.view())
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{payload}");
    } else {
        if let Some(subject) = &subject {
            println!("Respondent: {subject}");
        }
        render_result(&result);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let history = HistoryConfig {
        capacity: args.capacity.filter(|capacity| *capacity > 0),
        ..HistoryConfig::default()
    };
    let service = RiskAssessmentService::new(Arc::new(build_repository(&history)));

    println!("COVID-19 risk calculator demo");
    for submission in demo_submissions() {
        let record = service.assess(submission)?;
        println!("\n{} ({})", record.subject, record.id);
        render_result(&record.result);
    }

    let limit = args.limit.unwrap_or(usize::MAX);
    let records = service.history(Some(limit))?;
    render_history(&records);

    Ok(())
}

fn respondent(
    subject: &str,
    age: &str,
    weight_kg: &str,
    height_cm: &str,
    sex: Sex,
    factors: &[RiskFactor],
) -> AssessmentSubmission {
    let mut flags = RiskFactors::default();
    for factor in factors {
        flags.set(*factor, true);
    }
    AssessmentSubmission {
        subject: subject.to_string(),
        questionnaire: QuestionnaireForm {
            age: Some(age.to_string()),
            weight_kg: Some(weight_kg.to_string()),
            height_cm: Some(height_cm.to_string()),
            sex,
            factors: flags,
        },
    }
}

fn demo_submissions() -> Vec<AssessmentSubmission> {
    vec![
        respondent(
            "Ivanov Ivan Ivanovich",
            "70",
            "90",
            "170",
            Sex::Male,
            &[RiskFactor::Diabetes],
        ),
        respondent(
            "Petrova Anna Sergeevna",
            "25",
            "60",
            "165",
            Sex::Female,
            &[RiskFactor::CovidVaccine, RiskFactor::FluVaccine],
        ),
        respondent(
            "Smirnov Oleg",
            "58",
            "118",
            "176",
            Sex::Male,
            &[
                RiskFactor::Hypertension,
                RiskFactor::LungDisease,
                RiskFactor::Smoking,
                RiskFactor::MedicalWork,
                RiskFactor::CrowdExposure,
            ],
        ),
    ]
}

fn render_result(result: &RiskResult) {
    println!("{} | BMI {:.1}", result.headline(), result.bmi);

    if !result.components.is_empty() {
        println!("Score breakdown");
        for component in &result.components {
            println!("- {:+} {}", component.points, component.note);
        }
    }

    println!("Recommendations");
    for message in result.recommendation_messages() {
        println!("- {message}");
    }
}

fn render_history(records: &[AssessmentRecord]) {
    if records.is_empty() {
        println!("\nAssessment history: none");
        return;
    }

    println!("\nAssessment history");
    for record in records {
        let summary = record.summary();
        println!(
            "- {} | {} | age {} | {} | {} | factors: {} | {}",
            summary.assessed_at,
            summary.subject,
            summary.age,
            summary.sex,
            summary.measurements,
            summary.factors.join(", "),
            summary.result
        );
    }
}
