//! LinkedIn Job Search — professional-network source.
//!
//! Parameter names differ from the agent-facing keys: `keywords` (or
//! `title_filter`) goes out as `title_filter`, `location` as `location_filter`.
//! `remote` is always sent, lowercased, and defaults to `"true"`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::{
    text_field, AdapterError, ErrorRecord, Filter, ListingAdapter, ListingRecord, ListingSource,
    RapidApi, ResultRecord,
};

const HOST: &str = "linkedin-job-search-api.p.rapidapi.com";
const PROVIDER: &str = "LinkedIn Job Search";

pub const TOOL_NAME: &str = "LinkedIn Jobs Search";

const TOOL_DESCRIPTION: &str = "Use this tool to search for jobs on LinkedIn. \
You MUST pass a dictionary with these keys. Values of all keys are optional. You can keep them blank.:
- title_filter: Job title or keywords (e.g., 'Data Scientist')
- location_filter : City, country, or 'remote'
- seniority_filter : Entry, Mid, Senior, Director, Internship
- remote : true or false
- ai_experience_level_filter: Experience range. Acceptable values: 0-2 or 2-5 or 5-10 or 10+
Example: {\"title_filter\": \"Machine Learning Engineer\", \"location_filter\": \"India\", \"seniority_filter\": \"Senior\", \"remote\": \"true\",\"ai_experience_level_filter\":\"\"}";

#[derive(Debug, Deserialize)]
struct LinkedInJob {
    #[serde(default, deserialize_with = "text_field")]
    title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    company: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    location: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    job_url: Option<String>,
}

impl From<LinkedInJob> for ListingRecord {
    fn from(job: LinkedInJob) -> Self {
        ListingRecord {
            source: ListingSource::LinkedIn,
            title: job.title,
            company: job.company,
            location: job.location,
            link: job.job_url,
        }
    }
}

pub struct LinkedInAdapter {
    api: RapidApi,
    url: String,
}

impl LinkedInAdapter {
    pub fn new(api: RapidApi, url: String) -> Self {
        Self { api, url }
    }

    fn params(filter: &Filter) -> Vec<(&'static str, String)> {
        vec![
            (
                "title_filter",
                filter
                    .first_of(&["keywords", "title_filter"])
                    .unwrap_or_default(),
            ),
            (
                "location_filter",
                filter
                    .first_of(&["location", "location_filter"])
                    .unwrap_or_default(),
            ),
            ("seniority_filter", filter.get_or_empty("seniority_filter")),
            ("remote", remote_flag(filter)),
            (
                "ai_experience_level_filter",
                filter.get_or_empty("ai_experience_level_filter"),
            ),
        ]
    }
}

fn remote_flag(filter: &Filter) -> String {
    filter
        .get("remote")
        .map(|v| v.trim().to_lowercase())
        .unwrap_or_else(|| "true".to_string())
}

#[async_trait]
impl ListingAdapter for LinkedInAdapter {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    fn source(&self) -> ListingSource {
        ListingSource::LinkedIn
    }

    async fn fetch(&self, filter: &Filter) -> Result<Vec<ResultRecord>, AdapterError> {
        let response = self
            .api
            .get(&self.url, HOST, &Self::params(filter))
            .await
            .map_err(|source| AdapterError::Request {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            warn!(status, "LinkedIn Job Search returned an error status");
            return Ok(vec![ResultRecord::Error(ErrorRecord {
                error: format!("LinkedIn API Error {status}"),
            })]);
        }

        let jobs: Vec<LinkedInJob> =
            response
                .json()
                .await
                .map_err(|source| AdapterError::Decode {
                    provider: PROVIDER,
                    source,
                })?;

        info!(count = jobs.len(), "Fetched LinkedIn listings");

        Ok(jobs
            .into_iter()
            .map(|job| ResultRecord::Listing(job.into()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::mock::MockProvider;
    use serde_json::json;

    fn adapter(url: &str) -> LinkedInAdapter {
        LinkedInAdapter::new(RapidApi::new("test-key".to_string()), url.to_string())
    }

    #[tokio::test]
    async fn test_empty_filter_defaults_remote_to_true() {
        let provider = MockProvider::start(200, "[]").await;
        adapter(&provider.url)
            .fetch(&Filter::default())
            .await
            .unwrap();

        let request = &provider.requests()[0];
        assert_eq!(request.params["title_filter"], "");
        assert_eq!(request.params["location_filter"], "");
        assert_eq!(request.params["seniority_filter"], "");
        assert_eq!(request.params["ai_experience_level_filter"], "");
        assert_eq!(request.params["remote"], "true");
        assert_eq!(request.host.as_deref(), Some(HOST));
        assert_eq!(request.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_remote_is_lowercased() {
        let filter = Filter::from_value(json!({"remote": "False"})).unwrap();
        assert_eq!(remote_flag(&filter), "false");
        let filter = Filter::from_value(json!({"remote": false})).unwrap();
        assert_eq!(remote_flag(&filter), "false");
        let filter = Filter::from_value(json!({"remote": ""})).unwrap();
        assert_eq!(remote_flag(&filter), "true");
    }

    #[test]
    fn test_keywords_and_location_are_renamed() {
        let filter = Filter::from_value(json!({
            "keywords": "Data Scientist",
            "location": "India",
            "seniority_filter": "Senior"
        }))
        .unwrap();
        let params = LinkedInAdapter::params(&filter);
        assert!(params.contains(&("title_filter", "Data Scientist".to_string())));
        assert!(params.contains(&("location_filter", "India".to_string())));
        assert!(params.contains(&("seniority_filter", "Senior".to_string())));
    }

    #[test]
    fn test_advertised_keys_are_accepted_too() {
        let filter = Filter::from_value(json!({
            "title_filter": "Machine Learning Engineer",
            "location_filter": "India"
        }))
        .unwrap();
        let params = LinkedInAdapter::params(&filter);
        assert!(params.contains(&("title_filter", "Machine Learning Engineer".to_string())));
        assert!(params.contains(&("location_filter", "India".to_string())));
    }

    #[tokio::test]
    async fn test_success_uses_job_url_for_link() {
        let body = json!([
            {"title": "ML Engineer", "company": "Initech", "location": "India", "job_url": "https://li/1", "url": "https://ignored"},
            {"title": "Data Scientist", "company": "Hooli", "location": "Remote"}
        ])
        .to_string();
        let provider = MockProvider::start(200, &body).await;
        let records = adapter(&provider.url)
            .fetch(&Filter::default())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        let listings: Vec<&ListingRecord> = records
            .iter()
            .filter_map(|r| match r {
                ResultRecord::Listing(l) => Some(l),
                ResultRecord::Error(_) => None,
            })
            .collect();
        assert_eq!(listings.len(), 2);
        assert!(listings.iter().all(|l| l.source == ListingSource::LinkedIn));
        assert_eq!(listings[0].link.as_deref(), Some("https://li/1"));
        assert!(listings[1].link.is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_becomes_linkedin_error_record() {
        let provider = MockProvider::start(429, "Too Many Requests").await;
        let records = adapter(&provider.url)
            .fetch(&Filter::default())
            .await
            .unwrap();
        assert_eq!(
            records,
            vec![ResultRecord::Error(ErrorRecord {
                error: "LinkedIn API Error 429".to_string()
            })]
        );
    }
}
