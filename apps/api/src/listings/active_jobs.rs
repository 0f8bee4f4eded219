//! Active Jobs DB — general active-postings source.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::{
    text_field, AdapterError, ErrorRecord, Filter, ListingAdapter, ListingRecord, ListingSource,
    RapidApi, ResultRecord,
};

const HOST: &str = "active-jobs-db.p.rapidapi.com";
const PROVIDER: &str = "Active Jobs DB";

pub const TOOL_NAME: &str = "Active Jobs DB Search";

const TOOL_DESCRIPTION: &str = "Use this tool to search for jobs using the Active Jobs DB API. \
You MUST pass a dictionary with these keys. Values of all keys are optional. You can keep them blank.:
- title_filter: Job title or keywords (e.g., 'Python Developer')
- location_filter : City, country, or 'remote'
- remote: true or false
- ai_experience_level_filter: Experience range. Acceptable values: 0-2 or 2-5 or 5-10 or 10+
Example: {\"title_filter\": \"AI Engineer\", \"location_filter\": \"Remote\", \"remote\": \"true\",\"ai_experience_level_filter\": \"\"}";

/// Query parameters forwarded as-is; unset keys go out as empty strings.
const PARAMS: [&str; 4] = [
    "title_filter",
    "location_filter",
    "remote",
    "ai_experience_level_filter",
];

#[derive(Debug, Deserialize)]
struct ActiveJob {
    #[serde(default, deserialize_with = "text_field")]
    title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    company: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    location: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    url: Option<String>,
}

impl From<ActiveJob> for ListingRecord {
    fn from(job: ActiveJob) -> Self {
        ListingRecord {
            source: ListingSource::ActiveJobsDb,
            title: job.title,
            company: job.company,
            location: job.location,
            link: job.url,
        }
    }
}

pub struct ActiveJobsAdapter {
    api: RapidApi,
    url: String,
}

impl ActiveJobsAdapter {
    pub fn new(api: RapidApi, url: String) -> Self {
        Self { api, url }
    }

    fn params(filter: &Filter) -> Vec<(&'static str, String)> {
        PARAMS
            .iter()
            .map(|&key| (key, filter.get_or_empty(key)))
            .collect()
    }
}

#[async_trait]
impl ListingAdapter for ActiveJobsAdapter {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    fn source(&self) -> ListingSource {
        ListingSource::ActiveJobsDb
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
            warn!(status, "Active Jobs DB returned an error status");
            return Ok(vec![ResultRecord::Error(ErrorRecord {
                error: format!("Active Jobs API Error {status}"),
            })]);
        }

        let jobs: Vec<ActiveJob> =
            response
                .json()
                .await
                .map_err(|source| AdapterError::Decode {
                    provider: PROVIDER,
                    source,
                })?;

        info!(count = jobs.len(), "Fetched Active Jobs DB listings");

        Ok(jobs
            .into_iter()
            .map(|job| ResultRecord::Listing(job.into()))
            .collect())
    }
}
