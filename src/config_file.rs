use failure::Error;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use toml;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub jenkins_base_url: String,
    #[serde(default)]
    pub jenkins_username: String,
    #[serde(default)]
    pub jenkins_password: String,

    /// Total number of builds allowed per tracked job, the first one included.
    #[serde(default = "default_num_build_retries")]
    pub num_build_retries: u32,
    #[serde(default)]
    pub build_delay_secs: u32,
    #[serde(default = "default_job_refresh_period_secs")]
    pub job_refresh_period_secs: u64,
    /// Abort the tracked jobs' running builds when the tracker is interrupted.
    #[serde(default)]
    pub stop_builds_on_exit: bool,

    #[serde(default)]
    pub tracked_jobs: Vec<TrackedJobConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TrackedJobConfig {
    pub url: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

fn default_num_build_retries() -> u32 {
    1
}

fn default_job_refresh_period_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Config {
        Config {
            jenkins_base_url: String::new(),
            jenkins_username: String::new(),
            jenkins_password: String::new(),
            num_build_retries: default_num_build_retries(),
            build_delay_secs: 0,
            job_refresh_period_secs: default_job_refresh_period_secs(),
            stop_builds_on_exit: false,
            tracked_jobs: Vec::new(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| format_err!("Unable to read config file {}: {}", path.display(), e))?;
        Config::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Config, Error> {
        Ok(toml::from_str::<Config>(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::from_toml_str(r#"jenkins_base_url = "http://ci""#).unwrap();
        assert_eq!(config.jenkins_base_url, "http://ci");
        assert_eq!(config.jenkins_username, "");
        assert_eq!(config.num_build_retries, 1);
        assert_eq!(config.build_delay_secs, 0);
        assert_eq!(config.job_refresh_period_secs, 30);
        assert!(!config.stop_builds_on_exit);
        assert!(config.tracked_jobs.is_empty());
    }

    #[test]
    fn tracked_jobs_carry_their_parameters() {
        let config = Config::from_toml_str(
            r#"
            jenkins_base_url = "http://ci"
            num_build_retries = 3
            stop_builds_on_exit = true

            [[tracked_jobs]]
            url = "http://ci/job/api/"

            [[tracked_jobs]]
            url = "http://ci/job/deploy/"
            [tracked_jobs.parameters]
            ENV = "staging"
            "#,
        ).unwrap();

        assert_eq!(config.num_build_retries, 3);
        assert!(config.stop_builds_on_exit);
        assert_eq!(config.tracked_jobs.len(), 2);
        assert!(config.tracked_jobs[0].parameters.is_empty());
        assert_eq!(
            config.tracked_jobs[1].parameters.get("ENV").map(|v| v.as_str()),
            Some("staging")
        );
    }

    #[test]
    fn base_url_is_required() {
        assert!(Config::from_toml_str("num_build_retries = 2").is_err());
    }
}
