use anyhow::{Context, Result};

pub const DEFAULT_ACTIVE_JOBS_URL: &str = "https://active-jobs-db.p.rapidapi.com/active-ats-7d";
pub const DEFAULT_LINKEDIN_JOBS_URL: &str =
    "https://linkedin-job-search-api.p.rapidapi.com/active-jb-7d";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Application configuration loaded from environment variables.
/// Startup fails if the provider key or the model credentials are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub rapidapi_key: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub llm_temperature: f32,
    pub agent_max_iterations: usize,
    pub active_jobs_url: String,
    pub linkedin_jobs_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rapidapi_key: require_env("RAPIDAPI_KEY")?,
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_model: optional_env("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            llm_temperature: optional_env("LLM_TEMPERATURE", "0.7")
                .parse::<f32>()
                .context("LLM_TEMPERATURE must be a number")?,
            agent_max_iterations: optional_env("AGENT_MAX_ITERATIONS", "15")
                .parse::<usize>()
                .context("AGENT_MAX_ITERATIONS must be a positive integer")?,
            active_jobs_url: optional_env("ACTIVE_JOBS_URL", DEFAULT_ACTIVE_JOBS_URL),
            linkedin_jobs_url: optional_env("LINKEDIN_JOBS_URL", DEFAULT_LINKEDIN_JOBS_URL),
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
