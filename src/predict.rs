use serde::{Deserialize, Serialize};

use crate::classifier::pipeline::TrainedModel;
use crate::config::LOOKUP_DEFAULTS;
use crate::data::industry::lookup_default;
use crate::data::label::{classify_title, salary_band};
use crate::data::model::{FeatureRow, FeatureValue, Tier};
use crate::data::parsers::integers;
use crate::data::reference::ReferenceTable;
use crate::error::MissingInputError;

/// Experience ranges offered by the query form.
pub const EXPERIENCE_RANGES: [&str; 21] = [
    "0-1 Years",
    "0-2 Years",
    "0-3 Years",
    "0-4 Years",
    "0-5 Years",
    "1-3 Years",
    "1-4 Years",
    "2-3 Years",
    "2-4 Years",
    "2-6 Years",
    "2-7 Years",
    "3-5 Years",
    "3-6 Years",
    "3-7 Years",
    "3-8 Years",
    "4-6 Years",
    "4-8 Years",
    "4-9 Years",
    "5-8 Years",
    "5-10 Years",
    "12-15 Years",
];

// ---------------------------------------------------------------------------
// Query and result
// ---------------------------------------------------------------------------

/// One unseen listing as entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryInput {
    pub company: String,
    pub title: String,
    pub skills: String,
    pub location: String,
    pub experience: String,
}

impl QueryInput {
    /// Every field must hold something other than whitespace.
    pub fn validate(&self) -> Result<(), MissingInputError> {
        let fields = [
            ("company", &self.company),
            ("title", &self.title),
            ("skills", &self.skills),
            ("location", &self.location),
            ("experience", &self.experience),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingInputError { fields: missing })
        }
    }
}

/// The predicted tier plus the context values fed to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub tier: Tier,
    pub industry: String,
    pub ratings: Option<f64>,
    pub reviews: i64,
    pub job_post_days_ago: Option<f64>,
    pub min_experience: i64,
    pub max_experience: i64,
    pub min_salary: f64,
    pub max_salary: f64,
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Fill in the context fields a form cannot ask for and classify the query.
pub fn predict(
    model: &TrainedModel,
    query: &QueryInput,
    reference: &ReferenceTable,
) -> Result<Prediction, MissingInputError> {
    query.validate()?;

    let bounds = integers(&query.experience);
    let (min_experience, max_experience) = match (bounds.first(), bounds.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (0, 0),
    };

    let industry = lookup_default(&query.company).to_string();

    let (ratings, reviews) = reference
        .find_company(&query.company)
        .map(|r| (r.ratings, r.reviews))
        .unwrap_or((Some(LOOKUP_DEFAULTS.ratings), LOOKUP_DEFAULTS.reviews));

    let (min_salary, max_salary) = salary_band(classify_title(&query.title));

    let job_post_days_ago = reference
        .find_posting(&query.company, &query.title)
        .map(|r| r.job_post_days_ago)
        .unwrap_or(Some(LOOKUP_DEFAULTS.job_post_days_ago));

    let row: FeatureRow = vec![
        FeatureValue::text(&query.company),
        FeatureValue::text(&query.location),
        FeatureValue::from(ratings),
        FeatureValue::Number(reviews as f64),
        FeatureValue::text(&query.title),
        FeatureValue::text(&query.skills),
        FeatureValue::Number(min_experience as f64),
        FeatureValue::Number(max_experience as f64),
        FeatureValue::from(job_post_days_ago),
        FeatureValue::from(true),
        FeatureValue::Number(min_salary),
        FeatureValue::Number(max_salary),
        FeatureValue::text(&industry),
    ];

    let tier = model.predict_row(&row);
    log::debug!("Predicted {tier} for {:?} at {:?}", query.title, query.company);

    Ok(Prediction {
        tier,
        industry,
        ratings,
        reviews,
        job_post_days_ago,
        min_experience,
        max_experience,
        min_salary,
        max_salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::pipeline::train;
    use crate::config::TreeParams;
    use crate::data::model::RawListing;
    use crate::data::prepare::prepare_dataset;
    use crate::data::prepare::tests::raw;

    fn fixture() -> (TrainedModel, ReferenceTable) {
        let mut accenture = raw("Accenture", "Data Analyst", "2-4 Years");
        accenture.ratings = Some(4.2);
        accenture.reviews = "500 Reviews".into();
        accenture.job_post_history = "12 Days Ago".into();

        let rows: Vec<RawListing> = vec![
            accenture,
            raw("Oracle", "Senior Engineer", "5-8 Years"),
            raw("Shell", "Graduate Trainee", "0-1 Years"),
            raw("Siemens", "Project Manager", "5-10 Years"),
        ];
        let ds = prepare_dataset(&rows).unwrap();
        let model = train(&ds.features(), &ds.labels(), &TreeParams::default()).unwrap();
        (model, ds.reference_table())
    }

    fn query(company: &str, title: &str) -> QueryInput {
        QueryInput {
            company: company.into(),
            title: title.into(),
            skills: "Python".into(),
            location: "Bengaluru".into(),
            experience: "3-5 Years".into(),
        }
    }

    #[test]
    fn known_company_uses_reference_values() {
        let (model, reference) = fixture();
        let p = predict(&model, &query("Accenture", "Senior Engineer"), &reference).unwrap();

        assert_eq!(p.ratings, Some(4.2));
        assert_eq!(p.reviews, 500);
        assert_eq!(p.industry, "IT");
        assert_eq!((p.min_salary, p.max_salary), (12.0, 20.0));
        assert_eq!((p.min_experience, p.max_experience), (3, 5));
        // no Accenture posting with that title
        assert_eq!(p.job_post_days_ago, Some(30.0));
        assert!(Tier::ALL.contains(&p.tier));
    }

    #[test]
    fn posting_match_supplies_post_age() {
        let (model, reference) = fixture();
        let p = predict(&model, &query("accenture", "DATA ANALYST"), &reference).unwrap();
        assert_eq!(p.job_post_days_ago, Some(12.0));
        assert_eq!(p.ratings, Some(4.2));
        // industry lookup stays exact
        assert_eq!(p.industry, "Other/Unknown");
        assert_eq!((p.min_salary, p.max_salary), (6.0, 12.0));
    }

    #[test]
    fn unknown_company_falls_back_to_defaults() {
        let (model, reference) = fixture();
        let mut q = query("Nowhere Labs", "Intern");
        q.experience = "Fresher".into();
        let p = predict(&model, &q, &reference).unwrap();

        assert_eq!(p.ratings, Some(4.0));
        assert_eq!(p.reviews, 100);
        assert_eq!(p.job_post_days_ago, Some(30.0));
        assert_eq!((p.min_experience, p.max_experience), (0, 0));
        assert_eq!((p.min_salary, p.max_salary), (3.0, 6.0));
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let (model, reference) = fixture();
        let mut q = query("Accenture", "Engineer");
        q.skills = "  ".into();
        q.location.clear();

        let err = predict(&model, &q, &reference).unwrap_err();
        assert_eq!(err.fields, vec!["skills", "location"]);
        assert!(QueryInput::default().validate().is_err());
    }
}
