use std::collections::HashSet;

use super::industry::lookup_default;
use super::label::classify_title;
use super::model::{CleanedListing, FeatureTable, RawListing, Tier};
use super::parsers::{parse_experience, parse_post_age, parse_reviews, parse_salary};
use super::reference::ReferenceTable;
use crate::error::PrepareError;

// ---------------------------------------------------------------------------
// PreparedDataset – cleaned listings plus derived views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDataset {
    /// Cleaned listings in source order, duplicates removed.
    pub listings: Vec<CleanedListing>,
    /// How many exact duplicate rows were dropped.
    pub duplicates_dropped: usize,
}

impl PreparedDataset {
    pub fn features(&self) -> FeatureTable {
        FeatureTable::from_rows(self.listings.iter().map(CleanedListing::feature_row).collect())
    }

    pub fn labels(&self) -> Vec<Tier> {
        self.listings.iter().map(|l| l.salary_class).collect()
    }

    pub fn reference_table(&self) -> ReferenceTable {
        ReferenceTable::from_listings(&self.listings)
    }

    /// Number of listings per tier, indexed by [`Tier::index`].
    pub fn tier_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for l in &self.listings {
            counts[l.salary_class.index()] += 1;
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Deduplicate, parse and label the raw rows.
///
/// Fails on the first row whose experience or review count has no number;
/// the reported row index refers to `rows`.
pub fn prepare_dataset(rows: &[RawListing]) -> Result<PreparedDataset, PrepareError> {
    let mut seen: HashSet<&RawListing> = HashSet::with_capacity(rows.len());
    let mut listings = Vec::with_capacity(rows.len());

    for (row, raw) in rows.iter().enumerate() {
        if !seen.insert(raw) {
            continue;
        }
        let listing = clean_row(raw).map_err(|source| PrepareError::Parse { row, source })?;
        listings.push(listing);
    }

    let duplicates_dropped = rows.len() - listings.len();
    log::info!(
        "Prepared {} listings ({} duplicates dropped)",
        listings.len(),
        duplicates_dropped
    );

    Ok(PreparedDataset {
        listings,
        duplicates_dropped,
    })
}

fn clean_row(raw: &RawListing) -> Result<CleanedListing, crate::error::ParseError> {
    let (min_experience, max_experience) = parse_experience(&raw.experience)?;
    let reviews = parse_reviews(&raw.reviews)?;
    let salary = parse_salary(&raw.salary);

    Ok(CleanedListing {
        company: raw.company.clone(),
        location: raw.location.clone(),
        ratings: raw.ratings,
        reviews,
        title: raw.title.clone(),
        skills: raw.skills.clone(),
        min_experience,
        max_experience,
        job_post_days_ago: parse_post_age(&raw.job_post_history),
        salary_disclosed: salary.disclosed,
        min_salary: salary.min,
        max_salary: salary.max,
        industry: lookup_default(&raw.company).to_string(),
        salary_class: classify_title(&raw.title),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::industry::UNKNOWN_INDUSTRY;

    pub(crate) fn raw(company: &str, title: &str, experience: &str) -> RawListing {
        RawListing {
            company: company.into(),
            location: "Bengaluru".into(),
            ratings: Some(4.0),
            reviews: "120 Reviews".into(),
            title: title.into(),
            skills: "Python, SQL".into(),
            experience: experience.into(),
            job_post_history: "3 Days Ago".into(),
            salary: "Not disclosed".into(),
        }
    }

    #[test]
    fn cleans_every_field() {
        let mut row = raw("Accenture", "Senior Engineer", "3-5 Years");
        row.salary = "6,00,000 to 9,00,000".into();
        let ds = prepare_dataset(&[row]).unwrap();
        let l = &ds.listings[0];

        assert_eq!((l.min_experience, l.max_experience), (3, 5));
        assert_eq!(l.reviews, 120);
        assert_eq!(l.job_post_days_ago, Some(3.0));
        assert!(l.salary_disclosed);
        assert_eq!((l.min_salary, l.max_salary), (Some(600000.0), Some(900000.0)));
        assert_eq!(l.industry, "IT");
        assert_eq!(l.salary_class, Tier::High);
    }

    #[test]
    fn reversed_ranges_keep_max_at_least_min() {
        let mut row = raw("Oracle", "Engineer", "8-4 Years");
        row.salary = "9,00,000 to 6,00,000".into();
        let l = &prepare_dataset(&[row]).unwrap().listings[0];

        assert_eq!((l.min_experience, l.max_experience), (8, 8));
        assert_eq!((l.min_salary, l.max_salary), (Some(900000.0), Some(900000.0)));
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let a = raw("Oracle", "Analyst", "1-3 Years");
        let b = raw("Shell", "Engineer", "2-4 Years");
        let ds = prepare_dataset(&[a.clone(), b.clone(), a.clone(), b, a]).unwrap();

        assert_eq!(ds.listings.len(), 2);
        assert_eq!(ds.duplicates_dropped, 3);
        assert_eq!(ds.listings[0].company, "Oracle");
        assert_eq!(ds.listings[1].company, "Shell");
    }

    #[test]
    fn rows_differing_in_one_column_are_kept() {
        let a = raw("Oracle", "Analyst", "1-3 Years");
        let mut b = a.clone();
        b.ratings = None;
        assert_eq!(prepare_dataset(&[a, b]).unwrap().listings.len(), 2);
    }

    #[test]
    fn preparation_is_deterministic() {
        let rows = vec![
            raw("Oracle", "Analyst", "1-3 Years"),
            raw("Unknown Co", "Intern", "0-1 Years"),
            raw("Oracle", "Analyst", "1-3 Years"),
        ];
        let first = prepare_dataset(&rows).unwrap();
        let second = prepare_dataset(&rows).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.features(), second.features());
        assert_eq!(first.listings[1].industry, UNKNOWN_INDUSTRY);
    }

    #[test]
    fn unparseable_mandatory_field_reports_the_row() {
        let rows = vec![
            raw("Oracle", "Analyst", "1-3 Years"),
            raw("Oracle", "Analyst", "1-3 Years"),
            raw("Shell", "Engineer", "Not specified"),
        ];
        match prepare_dataset(&rows) {
            Err(PrepareError::Parse { row, source }) => {
                assert_eq!(row, 2);
                assert_eq!(source.field, "Experience");
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        let mut bad_reviews = raw("Shell", "Engineer", "2 Years");
        bad_reviews.reviews = "n/a".into();
        assert!(prepare_dataset(&[bad_reviews]).is_err());
    }

    #[test]
    fn labels_and_counts_are_parallel() {
        let rows = vec![
            raw("A", "Lead Engineer", "1 Years"),
            raw("B", "Associate", "1 Years"),
            raw("C", "Trainee", "1 Years"),
            raw("D", "Manager", "1 Years"),
        ];
        let ds = prepare_dataset(&rows).unwrap();
        assert_eq!(
            ds.labels(),
            vec![Tier::High, Tier::Medium, Tier::Low, Tier::High]
        );
        assert_eq!(ds.tier_counts(), [1, 1, 2]);
        assert_eq!(ds.features().len(), 4);
    }
}
