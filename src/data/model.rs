use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COMPANY: &str = "Company";
pub const LOCATION: &str = "Location";
pub const RATINGS: &str = "Ratings";
pub const REVIEWS: &str = "Reviews";
pub const TITLE: &str = "Title";
pub const SKILLS: &str = "Skills";
pub const EXPERIENCE: &str = "Experience";
pub const JOB_POST_HISTORY: &str = "Job_Post_History";
pub const SALARY: &str = "Salary";
pub const MIN_EXPERIENCE: &str = "Min_Experience";
pub const MAX_EXPERIENCE: &str = "Max_Experience";
pub const JOB_POST_DAYS_AGO: &str = "Job_Post_Days_Ago";
pub const SALARY_DISCLOSED: &str = "Salary_Disclosed";
pub const MIN_SALARY: &str = "Min_Salary";
pub const MAX_SALARY: &str = "Max_Salary";
pub const INDUSTRY: &str = "Industry";

/// Columns of the source dataset that the pipeline reads.
pub const RAW_COLUMNS: [&str; 9] = [
    COMPANY,
    LOCATION,
    RATINGS,
    REVIEWS,
    TITLE,
    SKILLS,
    EXPERIENCE,
    JOB_POST_HISTORY,
    SALARY,
];

/// Feature columns, in the order the classifier sees them.
pub const FEATURE_COLUMNS: [&str; 13] = [
    COMPANY,
    LOCATION,
    RATINGS,
    REVIEWS,
    TITLE,
    SKILLS,
    MIN_EXPERIENCE,
    MAX_EXPERIENCE,
    JOB_POST_DAYS_AGO,
    SALARY_DISCLOSED,
    MIN_SALARY,
    MAX_SALARY,
    INDUSTRY,
];

/// Feature columns that are one-hot encoded.
pub const CATEGORICAL_COLUMNS: [&str; 5] = [COMPANY, LOCATION, TITLE, SKILLS, INDUSTRY];

// ---------------------------------------------------------------------------
// Tier – the derived label
// ---------------------------------------------------------------------------

/// Ordinal salary class assigned from title keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tier {s:?}"))
    }
}

// ---------------------------------------------------------------------------
// RawListing – one row of the source file
// ---------------------------------------------------------------------------

/// A job listing exactly as read from disk, housekeeping columns removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawListing {
    pub company: String,
    pub location: String,
    pub ratings: Option<f64>,
    pub reviews: String,
    pub title: String,
    pub skills: String,
    pub experience: String,
    pub job_post_history: String,
    pub salary: String,
}

// Full-row equality for duplicate removal. Ratings compare by bit pattern so
// two missing ratings are equal, as in a dataframe duplicate check.
impl PartialEq for RawListing {
    fn eq(&self, other: &Self) -> bool {
        self.company == other.company
            && self.location == other.location
            && self.ratings.map(f64::to_bits) == other.ratings.map(f64::to_bits)
            && self.reviews == other.reviews
            && self.title == other.title
            && self.skills == other.skills
            && self.experience == other.experience
            && self.job_post_history == other.job_post_history
            && self.salary == other.salary
    }
}

impl Eq for RawListing {}

impl Hash for RawListing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.company.hash(state);
        self.location.hash(state);
        self.ratings.map(f64::to_bits).hash(state);
        self.reviews.hash(state);
        self.title.hash(state);
        self.skills.hash(state);
        self.experience.hash(state);
        self.job_post_history.hash(state);
        self.salary.hash(state);
    }
}

// ---------------------------------------------------------------------------
// CleanedListing – typed, derived record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedListing {
    pub company: String,
    pub location: String,
    pub ratings: Option<f64>,
    pub reviews: i64,
    pub title: String,
    pub skills: String,
    pub min_experience: i64,
    pub max_experience: i64,
    pub job_post_days_ago: Option<f64>,
    pub salary_disclosed: bool,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub industry: String,
    pub salary_class: Tier,
}

impl CleanedListing {
    /// Project the listing onto [`FEATURE_COLUMNS`].
    pub fn feature_row(&self) -> FeatureRow {
        vec![
            FeatureValue::text(&self.company),
            FeatureValue::text(&self.location),
            FeatureValue::from(self.ratings),
            FeatureValue::Number(self.reviews as f64),
            FeatureValue::text(&self.title),
            FeatureValue::text(&self.skills),
            FeatureValue::Number(self.min_experience as f64),
            FeatureValue::Number(self.max_experience as f64),
            FeatureValue::from(self.job_post_days_ago),
            FeatureValue::from(self.salary_disclosed),
            FeatureValue::from(self.min_salary),
            FeatureValue::from(self.max_salary),
            FeatureValue::text(&self.industry),
        ]
    }
}

// ---------------------------------------------------------------------------
// FeatureValue – a single cell in the feature table
// ---------------------------------------------------------------------------

/// A feature cell: text for categorical columns, numbers for the rest.
/// Booleans are stored as 0/1. Missing numbers stay `Missing`, never NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
    Missing,
}

impl FeatureValue {
    pub fn text(s: &str) -> Self {
        FeatureValue::Text(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Option<f64>> for FeatureValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FeatureValue::Missing, FeatureValue::Number)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Number(if value { 1.0 } else { 0.0 })
    }
}

/// One row of the feature table, aligned with [`FEATURE_COLUMNS`].
pub type FeatureRow = Vec<FeatureValue>;

// ---------------------------------------------------------------------------
// FeatureTable – the cleaned dataset ready for fitting
// ---------------------------------------------------------------------------

/// The assembled feature matrix with per-column distinct values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    /// Column names, always [`FEATURE_COLUMNS`].
    pub column_names: Vec<String>,
    /// One row per cleaned listing.
    pub rows: Vec<FeatureRow>,
    /// For each text column the sorted set of distinct values.
    pub unique_values: BTreeMap<String, BTreeSet<String>>,
}

impl FeatureTable {
    /// Build the table and its column indices from feature rows.
    pub fn from_rows(rows: Vec<FeatureRow>) -> Self {
        let column_names: Vec<String> = FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut unique_values: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for row in &rows {
            for (col, val) in column_names.iter().zip(row) {
                if let FeatureValue::Text(s) = val {
                    unique_values
                        .entry(col.clone())
                        .or_default()
                        .insert(s.clone());
                }
            }
        }

        FeatureTable {
            column_names,
            rows,
            unique_values,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
