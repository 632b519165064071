use super::model::Tier;

/// Title keywords per tier, checked from the top. The first tier with a
/// matching keyword wins, so "Senior Analyst" is High.
pub const TIER_KEYWORDS: [(Tier, &[&str]); 2] = [
    (Tier::High, &["senior", "lead", "manager", "consultant"]),
    (Tier::Medium, &["analyst", "associate", "specialist"]),
];

/// Estimated salary range per tier, in lakhs per annum.
pub const SALARY_BANDS: [(Tier, f64, f64); 3] = [
    (Tier::Low, 3.0, 6.0),
    (Tier::Medium, 6.0, 12.0),
    (Tier::High, 12.0, 20.0),
];

/// Derive the salary tier of a job title.
pub fn classify_title(title: &str) -> Tier {
    let lower = title.to_lowercase();
    TIER_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(tier, _)| *tier)
        .unwrap_or(Tier::Low)
}

/// Placeholder `(min, max)` salary for a tier.
pub fn salary_band(tier: Tier) -> (f64, f64) {
    SALARY_BANDS
        .iter()
        .find(|(t, _, _)| *t == tier)
        .map(|&(_, lo, hi)| (lo, hi))
        .unwrap_or((3.0, 6.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_keywords_take_priority() {
        assert_eq!(classify_title("Senior Analyst"), Tier::High);
        assert_eq!(classify_title("Team LEAD - Associate"), Tier::High);
        assert_eq!(classify_title("Management Consultant"), Tier::High);
    }

    #[test]
    fn medium_and_default_tiers() {
        assert_eq!(classify_title("Data Analyst"), Tier::Medium);
        assert_eq!(classify_title("Product Specialist"), Tier::Medium);
        assert_eq!(classify_title("Software Engineer"), Tier::Low);
        assert_eq!(classify_title(""), Tier::Low);
    }

    #[test]
    fn bands_follow_tiers() {
        assert_eq!(salary_band(Tier::High), (12.0, 20.0));
        assert_eq!(salary_band(Tier::Medium), (6.0, 12.0));
        assert_eq!(salary_band(Tier::Low), (3.0, 6.0));
    }
}
