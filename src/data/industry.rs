/// Industry reported for companies missing from the map.
pub const UNKNOWN_INDUSTRY: &str = "Other/Unknown";

/// Company name → industry. Keys must match the dataset exactly, including
/// the trailing space some scraped company names carry.
pub type IndustryMap = [(&'static str, &'static str)];

pub static INDUSTRY_MAP: &IndustryMap = &[
    ("Accenture", "IT"),
    ("Oracle", "IT"),
    ("Rave Technologies", "IT"),
    ("Snaphunt", "IT"),
    ("Aspire Systems", "IT"),
    ("CompuCom", "IT"),
    ("Citibank, N.A", "Banking"),
    ("Credit Suisse", "Banking"),
    ("BNY Mellon", "Banking"),
    ("NatWest Group", "Banking"),
    ("Duff & Phelps", "Finance"),
    ("Thinksynq Solutions", "Finance/Consulting"),
    ("CoinDCX", "Fintech"),
    ("Siemens", "Industrial"),
    ("Prodair Air Products", "Industrial"),
    ("Air Products", "Industrial"),
    ("Sona Comstar", "Industrial"),
    ("Shell", "Energy"),
    ("Ubisoft", "Gaming"),
    ("Method Studios", "Media"),
    ("Company3 Method India Private Limited ", "Media"),
    ("HealthSpring", "Healthcare"),
    ("Icon Clinical Research", "Healthcare"),
    ("Icon Pharmaceutical s", "Healthcare"),
    ("RRD", "Media/Printing"),
    ("Kraftmaid Services India", "Manufacturing"),
    ("Associated Auto Solutions International Pvt. Ltd.", "Auto"),
    ("Eversendai", "Construction"),
];

/// Exact, case-sensitive lookup with the `Other/Unknown` fallback.
pub fn lookup_industry<'a>(company: &str, map: &'a IndustryMap) -> &'a str {
    map.iter()
        .find(|(name, _)| *name == company)
        .map(|(_, industry)| *industry)
        .unwrap_or(UNKNOWN_INDUSTRY)
}

pub fn lookup_default(company: &str) -> &'static str {
    lookup_industry(company, INDUSTRY_MAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_companies() {
        assert_eq!(lookup_industry("Oracle", INDUSTRY_MAP), "IT");
        assert_eq!(lookup_industry("Unknown Co", INDUSTRY_MAP), UNKNOWN_INDUSTRY);
        assert_eq!(lookup_default("Shell"), "Energy");
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(lookup_default("oracle"), UNKNOWN_INDUSTRY);
        assert_eq!(lookup_default("Company3 Method India Private Limited"), UNKNOWN_INDUSTRY);
        assert_eq!(lookup_default("Company3 Method India Private Limited "), "Media");
    }

    #[test]
    fn custom_maps_are_supported() {
        let map: &IndustryMap = &[("Acme", "Retail")];
        assert_eq!(lookup_industry("Acme", map), "Retail");
        assert_eq!(lookup_industry("Oracle", map), UNKNOWN_INDUSTRY);
    }
}
