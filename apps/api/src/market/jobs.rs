//! Job search through the JSearch aggregator, with response caching,
//! normalisation to the listing shape the frontend renders, and sample data
//! for when the API is unavailable.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::cache::{JobCache, JobQuery};
use super::{check_status, MarketError};

const JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
const JSEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const SAMPLE_APPLY_LINK: &str = "https://rapidapi.com/letscrape-6bRBa3QguO5/api/jsearch";
const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Upstream job-listing provider. Returns the raw provider payload.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, query: &JobQuery) -> Result<Value, MarketError>;
}

/// JSearch via RapidAPI.
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    api_key: Option<String>,
}

impl JSearchClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl JobSource for JSearchClient {
    async fn fetch(&self, query: &JobQuery) -> Result<Value, MarketError> {
        let api_key = self.api_key.as_deref().ok_or(MarketError::NotConfigured)?;

        let mut params = vec![
            ("query", format!("{} in {}", query.query, query.location)),
            ("page", query.page.to_string()),
            ("num_pages", "1".to_string()),
            ("date_posted", query.date_posted.clone()),
        ];
        if let Some(employment_type) = &query.employment_type {
            params.push(("employment_types", employment_type.clone()));
        }

        info!("Fetching jobs from JSearch: {} in {}", query.query, query.location);
        let response = self
            .client
            .get(JSEARCH_URL)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .query(&params)
            .timeout(JSEARCH_TIMEOUT)
            .send()
            .await?;
        check_status(&response)?;

        Ok(response.json().await?)
    }
}

/// Job search with the one-hour response cache in front of the provider.
pub struct JobSearch {
    source: Arc<dyn JobSource>,
    cache: JobCache,
}

impl JobSearch {
    pub fn new(source: Arc<dyn JobSource>, cache: JobCache) -> Self {
        Self { source, cache }
    }

    /// Serves from cache when fresh, otherwise calls the provider and caches
    /// the successful response.
    pub async fn search(&self, query: JobQuery) -> Result<Arc<Value>, MarketError> {
        if let Some(hit) = self.cache.get(&query) {
            debug!("Returning cached job results for {:?}", query);
            return Ok(hit);
        }

        let value = Arc::new(self.source.fetch(&query).await?);
        self.cache.insert(query, Arc::clone(&value));
        Ok(value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Listing shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobListing {
    pub id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub salary: String,
    pub description: String,
    pub apply_link: Option<String>,
    pub source: String,
    pub posted_at: Option<String>,
    pub logo: Option<String>,
    pub required_skills: Vec<String>,
    pub is_remote: bool,
}

/// Human label for a JSearch employment type code. Unknown codes pass through.
pub fn employment_type_label(code: &str) -> String {
    match code {
        "FULLTIME" => "Full-time",
        "PARTTIME" => "Part-time",
        "CONTRACTOR" => "Contract",
        "INTERN" => "Internship",
        other => other,
    }
    .to_string()
}

fn str_field(job: &Value, key: &str) -> Option<String> {
    job.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Salary band: lakhs per annum for INR, thousands of dollars otherwise.
pub fn format_salary(job: &Value) -> String {
    let min = job.get("job_min_salary").and_then(Value::as_f64).filter(|v| *v > 0.0);
    let max = job.get("job_max_salary").and_then(Value::as_f64).filter(|v| *v > 0.0);
    let (Some(min), Some(max)) = (min, max) else {
        return "Not specified".to_string();
    };

    match job.get("job_salary_currency").and_then(Value::as_str) {
        Some("INR") => format!("₹{:.1}-{:.1} LPA", min / 100_000.0, max / 100_000.0),
        _ => format!("${:.0}k-${:.0}k", min / 1000.0, max / 1000.0),
    }
}

fn preview(description: Option<String>) -> String {
    match description {
        Some(text) => {
            let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{cut}...")
        }
        None => "No description available".to_string(),
    }
}

/// Normalises a raw JSearch payload into listings.
pub fn format_jobs(payload: &Value) -> Vec<JobListing> {
    let Some(jobs) = payload.get("data").and_then(Value::as_array) else {
        return vec![];
    };

    jobs.iter()
        .map(|job| {
            let is_remote = job.get("job_is_remote").and_then(Value::as_bool).unwrap_or(false);
            let location = if is_remote {
                "Remote".to_string()
            } else {
                str_field(job, "job_city")
                    .or_else(|| str_field(job, "job_state"))
                    .or_else(|| str_field(job, "job_country"))
                    .unwrap_or_else(|| "Not specified".to_string())
            };
            let employment_type = str_field(job, "job_employment_type").unwrap_or_else(|| "FULLTIME".to_string());
            let required_skills = job
                .get("job_required_skills")
                .and_then(Value::as_array)
                .map(|skills| {
                    skills
                        .iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default();

            JobListing {
                id: str_field(job, "job_id"),
                title: str_field(job, "job_title"),
                company: str_field(job, "employer_name"),
                location,
                employment_type: employment_type_label(&employment_type),
                salary: format_salary(job),
                description: preview(str_field(job, "job_description")),
                apply_link: str_field(job, "job_apply_link").or_else(|| str_field(job, "job_google_link")),
                source: str_field(job, "job_publisher").unwrap_or_else(|| "Unknown".to_string()),
                posted_at: str_field(job, "job_posted_at_datetime_utc"),
                logo: str_field(job, "employer_logo"),
                required_skills,
                is_remote,
            }
        })
        .collect()
}

/// Placeholder listings shown when the job API is unavailable.
pub fn sample_jobs(query: &str, location: &str, employment_type: Option<&str>) -> Vec<JobListing> {
    let label = employment_type_label(employment_type.unwrap_or("FULLTIME"));
    let sample = |id: &str, title: String, company: &str, description: &str, is_remote: bool| JobListing {
        id: Some(id.to_string()),
        title: Some(title),
        company: Some(company.to_string()),
        location: location.to_string(),
        employment_type: label.clone(),
        salary: "Not specified".to_string(),
        description: description.to_string(),
        apply_link: Some(SAMPLE_APPLY_LINK.to_string()),
        source: "Sample".to_string(),
        posted_at: None,
        logo: None,
        required_skills: vec![],
        is_remote,
    };

    vec![
        sample(
            "sample-1",
            format!("Senior {query}"),
            "Tech Corp",
            "Sample listing. Configure JSEARCH_API_KEY to see real jobs.",
            location.eq_ignore_ascii_case("remote"),
        ),
        sample(
            "sample-2",
            format!("Junior {query}"),
            "StartUp Inc",
            "Sample listing. Real job listings appear here once the job API is reachable.",
            false,
        ),
    ]
}

/// Why sample data is being shown instead of live listings.
pub fn fallback_message(error: &MarketError) -> String {
    match error {
        MarketError::NotConfigured => {
            "Job search API key not configured. Showing sample listings.".to_string()
        }
        MarketError::Forbidden(status) => format!(
            "Job search API access denied ({status}). Check the JSearch subscription. Showing sample listings."
        ),
        other => format!("Failed to fetch jobs: {other}. Showing sample listings."),
    }
}
