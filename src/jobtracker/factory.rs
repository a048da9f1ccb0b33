use config_file::Config;
use errors::ConfigurationError;
use integrations::remote_integration::RequestManager;
use jobtracker::tracked_build_job::{Retrigger, TrackedBuildJob};
use model::{Job, JobKey};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const RETRY_LIMIT: u32 = 10;

/// Builds the tracker for a job whose first build has already been triggered,
/// so only `num_tries - 1` retries remain.
pub fn create(job: JobKey, num_tries: u32, retrigger: Retrigger) -> Result<TrackedBuildJob, ConfigurationError> {
    ensure_retry_limit(num_tries)?;
    Ok(TrackedBuildJob::new(job, num_tries.saturating_sub(1), retrigger))
}

/// Tracks `job` with the configured retry count, retriggering it through
/// `request_manager` with the same parameters as the first build.
pub fn new_build_job<R>(
    job: &Job,
    config: &Config,
    params: BTreeMap<String, String>,
    request_manager: Rc<R>,
) -> Result<TrackedBuildJob, ConfigurationError>
where
    R: RequestManager + 'static,
{
    let retried_job = job.clone();
    let retrigger = move || {
        if let Err(e) = request_manager.run_parameterized_build(&retried_job, &params) {
            warn!(
                "--Tracker--: Failed to retrigger {}. Details: {}",
                retried_job.job_name(),
                e
            );
        }
    };
    create(job.key(), config.num_build_retries, Box::new(retrigger))
}

fn ensure_retry_limit(num_tries: u32) -> Result<(), ConfigurationError> {
    if num_tries > RETRY_LIMIT {
        return Err(ConfigurationError::RetryLimitExceeded {
            requested: num_tries,
            limit: RETRY_LIMIT,
        });
    }
    Ok(())
}
