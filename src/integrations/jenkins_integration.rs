use config_file::Config;
use failure::Error;
use integrations::jenkins_parser;
use integrations::remote_integration::RequestManager;
use integrations::url_builder;
use model::{Build, Jenkins, Job, JobKey, TestResult, ViewElement};
use network::{get_url_body, post_url, Credentials};
use std::collections::BTreeMap;

pub struct JenkinsIntegration {
    credentials: Credentials,
    base_url: String,
    build_delay_secs: u32,
}

impl JenkinsIntegration {
    pub fn new(username: &str, password: &str, base_url: &str, build_delay_secs: u32) -> JenkinsIntegration {
        JenkinsIntegration {
            credentials: Credentials::new(username, password),
            base_url: base_url.to_string(),
            build_delay_secs: build_delay_secs,
        }
    }

    pub fn from_config(config: &Config) -> JenkinsIntegration {
        JenkinsIntegration::new(
            &config.jenkins_username,
            &config.jenkins_password,
            &config.jenkins_base_url,
            config.build_delay_secs,
        )
    }

    pub fn load_workspace(&self) -> Result<Jenkins, Error> {
        let url = url_builder::workspace_url(&self.base_url)?;
        let body = get_url_body(&url, &self.credentials)?;
        jenkins_parser::create_workspace(&body, &self.base_url)
    }

    pub fn load_view_jobs(&self, view_url: &str) -> Result<Vec<ViewElement>, Error> {
        let url = url_builder::view_url(view_url)?;
        let body = get_url_body(&url, &self.credentials)?;
        jenkins_parser::create_view_jobs(&body)
    }

    pub fn load_job(&self, job_url: &str) -> Result<Job, Error> {
        let url = url_builder::job_url(job_url)?;
        let body = get_url_body(&url, &self.credentials)?;
        jenkins_parser::create_job(&body)
    }

    pub fn load_build(&self, build_url: &str) -> Result<Build, Error> {
        let url = url_builder::build_url(build_url)?;
        let body = get_url_body(&url, &self.credentials)?;
        jenkins_parser::create_build(&body)
    }

    pub fn load_builds(&self, job: &JobKey) -> Result<Vec<Build>, Error> {
        let url = url_builder::builds_url(&job.url)?;
        let body = get_url_body(&url, &self.credentials)?;
        jenkins_parser::create_builds(job, &body)
    }

    pub fn load_test_results(&self, build: &Build) -> Result<TestResult, Error> {
        let url = url_builder::test_report_url(&build.url)?;
        let body = get_url_body(&url, &self.credentials)?;
        jenkins_parser::create_test_results(&body)
    }

    /// Console output of the job's most recent build, or `None` when it never ran.
    pub fn load_console_text(&self, job: &Job) -> Result<Option<String>, Error> {
        match job.last_build() {
            Some(build) => {
                let url = url_builder::console_text_url(&build.url)?;
                Ok(Some(get_url_body(&url, &self.credentials)?))
            }
            None => Ok(None),
        }
    }

    pub fn stop_build(&self, build: &Build) -> Result<(), Error> {
        let url = url_builder::stop_build_url(&build.url)?;
        info!("--Jenkins--: Stopping build {}.", build.url);
        post_url(&url, &self.credentials)
    }
}

impl RequestManager for JenkinsIntegration {
    fn run_parameterized_build(&self, job: &Job, params: &BTreeMap<String, String>) -> Result<(), Error> {
        let url = url_builder::run_job_url(job.url(), self.build_delay_secs, params)?;
        info!("--Jenkins--: Triggering a build of {}.", job.job_name());
        post_url(&url, &self.credentials)
    }
}
