use super::model::CleanedListing;

/// The columns of a cleaned listing kept for prediction-time lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    pub company: String,
    pub title: String,
    pub ratings: Option<f64>,
    pub reviews: i64,
    pub job_post_days_ago: Option<f64>,
}

/// Retained subset of the training data, in prepared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        Self { rows }
    }

    pub fn from_listings(listings: &[CleanedListing]) -> Self {
        Self::new(
            listings
                .iter()
                .map(|l| ReferenceRow {
                    company: l.company.clone(),
                    title: l.title.clone(),
                    ratings: l.ratings,
                    reviews: l.reviews,
                    job_post_days_ago: l.job_post_days_ago,
                })
                .collect(),
        )
    }

    /// First row whose company matches, ignoring case.
    pub fn find_company(&self, company: &str) -> Option<&ReferenceRow> {
        let company = company.to_lowercase();
        self.rows.iter().find(|r| r.company.to_lowercase() == company)
    }

    /// First row whose company and title both match, ignoring case.
    pub fn find_posting(&self, company: &str, title: &str) -> Option<&ReferenceRow> {
        let company = company.to_lowercase();
        let title = title.to_lowercase();
        self.rows
            .iter()
            .find(|r| r.company.to_lowercase() == company && r.title.to_lowercase() == title)
    }
}
