use failure::Error;
use model::Job;
use std::collections::BTreeMap;

/// Whatever can ask the CI server to start a build.
///
/// Triggering is fire-and-forget: the outcome of the build only shows up in
/// a later poll.
pub trait RequestManager {
    fn run_parameterized_build(&self, job: &Job, params: &BTreeMap<String, String>) -> Result<(), Error>;
}
