use model::Build;
use std::collections::HashMap;

#[derive(Debug)]
struct SeenBuild {
    building: bool,
    job_url: Option<String>,
}

/// Turns successive lists of recent builds into the builds that finished
/// since the previous look.
#[derive(Debug, Default)]
pub struct FinishedBuildWatcher {
    seen_by_url: HashMap<String, SeenBuild>,
    seeded: bool,
}

impl FinishedBuildWatcher {
    pub fn new() -> FinishedBuildWatcher {
        FinishedBuildWatcher::default()
    }

    /// Records `builds` and returns, keyed by build url, those that are done
    /// now but were running or unknown last time. The very first call only
    /// seeds the watcher, so builds that finished before we started watching
    /// are never reported.
    pub fn observe<'a, I>(&mut self, builds: I) -> HashMap<String, Build>
    where
        I: IntoIterator<Item = &'a Build>,
    {
        let mut finished = HashMap::new();
        for build in builds {
            let seen = SeenBuild {
                building: build.building,
                job_url: build.job.as_ref().map(|job| job.url.clone()),
            };
            let newly_finished = match self.seen_by_url.insert(build.url.clone(), seen) {
                None => true,
                Some(previous) => previous.building,
            };
            if self.seeded && !build.building && newly_finished {
                finished.insert(build.url.clone(), build.clone());
            }
        }
        self.seeded = true;
        finished
    }

    /// Drops the history of builds owned by the job at `job_url`. Builds
    /// observed without an owning job are kept.
    pub fn forget_job(&mut self, job_url: &str) {
        self.seen_by_url
            .retain(|_, seen| seen.job_url.as_ref().map(String::as_str) != Some(job_url));
    }
}
