use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const COMPANIES: [&str; 10] = [
    "Accenture",
    "Oracle",
    "Citibank, N.A",
    "Siemens",
    "Shell",
    "Ubisoft",
    "HealthSpring",
    "CoinDCX",
    "Brightlane Analytics",
    "Northwind Traders",
];
const LOCATIONS: [&str; 6] = ["Bengaluru", "Pune", "Hyderabad", "Chennai", "Gurgaon", "Mumbai"];
const TITLES: [&str; 10] = [
    "Senior Software Engineer",
    "Team Lead - Data",
    "Project Manager",
    "Technical Consultant",
    "Data Analyst",
    "Associate Developer",
    "QA Specialist",
    "Software Engineer",
    "Graduate Trainee",
    "Support Executive",
];
const SKILLS: [&str; 6] = [
    "Python, SQL",
    "Java, Spring",
    "Excel, Power BI",
    "C++, Embedded",
    "AWS, Terraform",
    "Selenium, Testing",
];
const EXPERIENCE: [&str; 8] = [
    "0-1 Years",
    "0-3 Years",
    "1-3 Years",
    "2-4 Years",
    "3-5 Years",
    "4-8 Years",
    "5-10 Years",
    "7 Years",
];
const POSTED: [&str; 7] = [
    "Few Hours Ago",
    "Just Now",
    "1 Day Ago",
    "6 Days Ago",
    "30+ Days Ago",
    "1 Month Ago",
    "2 Months Ago",
];

#[derive(Clone)]
struct Listing {
    company: String,
    location: String,
    ratings: Option<f64>,
    reviews: String,
    title: String,
    skills: String,
    experience: String,
    posted: String,
    salary: String,
}

fn random_listing(rng: &mut SimpleRng) -> Listing {
    let ratings = if rng.next_f64() < 0.1 {
        None
    } else {
        Some((30.0 + rng.next_f64() * 17.0).round() / 10.0)
    };
    let reviews = format!("{} Reviews", 5 + rng.next_u64() % 2500);
    let salary = if rng.next_f64() < 0.6 {
        "Not disclosed".to_string()
    } else {
        let lo = 3 + rng.next_u64() % 12;
        let hi = lo + 1 + rng.next_u64() % 8;
        format!("{},00,000 to {},00,000", lo, hi)
    };

    Listing {
        company: rng.pick(&COMPANIES).to_string(),
        location: rng.pick(&LOCATIONS).to_string(),
        ratings,
        reviews,
        title: rng.pick(&TITLES).to_string(),
        skills: rng.pick(&SKILLS).to_string(),
        experience: rng.pick(&EXPERIENCE).to_string(),
        posted: rng.pick(&POSTED).to_string(),
        salary,
    }
}

fn url_for(i: usize) -> String {
    format!("https://jobs.example.com/listing/{i}")
}

fn string_column<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from(values.collect::<Vec<_>>()))
}

fn write_parquet(listings: &[Listing], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Unnamed: 0", DataType::Int64, false),
        Field::new("Company", DataType::Utf8, false),
        Field::new("Location", DataType::Utf8, false),
        Field::new("Ratings", DataType::Float64, true),
        Field::new("Reviews", DataType::Utf8, false),
        Field::new("Title", DataType::Utf8, false),
        Field::new("Skills", DataType::Utf8, false),
        Field::new("Experience", DataType::Utf8, false),
        Field::new("Job_Post_History", DataType::Utf8, false),
        Field::new("Salary", DataType::Utf8, false),
        Field::new("URL", DataType::Utf8, false),
    ]));

    let urls: Vec<String> = (0..listings.len()).map(url_for).collect();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(0..listings.len() as i64)),
        string_column(listings.iter().map(|l| l.company.as_str())),
        string_column(listings.iter().map(|l| l.location.as_str())),
        Arc::new(Float64Array::from(
            listings.iter().map(|l| l.ratings).collect::<Vec<_>>(),
        )),
        string_column(listings.iter().map(|l| l.reviews.as_str())),
        string_column(listings.iter().map(|l| l.title.as_str())),
        string_column(listings.iter().map(|l| l.skills.as_str())),
        string_column(listings.iter().map(|l| l.experience.as_str())),
        string_column(listings.iter().map(|l| l.posted.as_str())),
        string_column(listings.iter().map(|l| l.salary.as_str())),
        string_column(urls.iter().map(String::as_str)),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(listings: &[Listing], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Unnamed: 0",
        "Company",
        "Location",
        "Ratings",
        "Reviews",
        "Title",
        "Skills",
        "Experience",
        "Job_Post_History",
        "Salary",
        "URL",
    ])?;
    for (i, l) in listings.iter().enumerate() {
        let index = i.to_string();
        let ratings = l.ratings.map(|r| r.to_string()).unwrap_or_default();
        let url = url_for(i);
        writer.write_record([
            index.as_str(),
            l.company.as_str(),
            l.location.as_str(),
            ratings.as_str(),
            l.reviews.as_str(),
            l.title.as_str(),
            l.skills.as_str(),
            l.experience.as_str(),
            l.posted.as_str(),
            l.salary.as_str(),
            url.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut listings: Vec<Listing> = (0..400).map(|_| random_listing(&mut rng)).collect();

    // Re-posted listings: identical content, which the cleaner must collapse.
    for i in (0..40).step_by(4) {
        let copy = listings[i].clone();
        listings.push(copy);
    }

    write_parquet(&listings, "sample_jobs.parquet")?;
    write_csv(&listings, "sample_jobs.csv")?;

    println!(
        "Wrote {} listings to sample_jobs.parquet and sample_jobs.csv",
        listings.len()
    );
    Ok(())
}
