use integrations::remote_integration::RequestManager;
use jobtracker::tracked_build_job::TrackedBuildJob;
use model::{Build, Job};
use std::collections::{BTreeMap, HashMap};

/// Every build retry campaign in flight for one server connection, keyed by
/// job url.
///
/// The registry is owned by whoever drives the poll loop. It holds the
/// retrigger closures, which are neither `Send` nor `Sync`, so sharing it
/// between pollers means wrapping it in a lock of the caller's choosing.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: HashMap<String, TrackedBuildJob>,
}

impl JobRegistry {
    pub fn new() -> JobRegistry {
        JobRegistry::default()
    }

    /// Starts tracking `job`, dropping any campaign already running for the same url.
    pub fn register(&mut self, job: TrackedBuildJob) {
        let url = job.job().url.clone();
        if let Some(replaced) = self.jobs.insert(url, job) {
            info!(
                "--Tracker--: Replaced the tracked build of {} ({} tries were left).",
                replaced.job().name,
                replaced.remaining_tries()
            );
        }
    }

    /// Triggers the first build of `job` and starts tracking it. When the
    /// trigger fails the error is logged, nothing is registered and `false`
    /// comes back.
    pub fn trigger_and_register<R>(
        &mut self,
        request_manager: &R,
        job: &Job,
        params: &BTreeMap<String, String>,
        tracked: TrackedBuildJob,
    ) -> bool
    where
        R: RequestManager + ?Sized,
    {
        match request_manager.run_parameterized_build(job, params) {
            Ok(()) => {
                self.register(tracked);
                true
            }
            Err(e) => {
                warn!(
                    "--Tracker--: Failed to trigger {}, it won't be tracked. Details: {}",
                    job.job_name(),
                    e
                );
                false
            }
        }
    }

    /// Hands every finished build to every tracked job, then removes and
    /// returns the jobs that have nothing left to do. Each failed build a job
    /// owns spends one retry, even when several arrive in the same batch.
    pub fn on_new_finished_builds(&mut self, finished_builds: &HashMap<String, Build>) -> Vec<TrackedBuildJob> {
        for tracked in self.jobs.values_mut() {
            for build in finished_builds.values() {
                tracked.on_build_finished(build);
            }
        }
        self.remove_done_jobs()
    }

    fn remove_done_jobs(&mut self) -> Vec<TrackedBuildJob> {
        let done: Vec<String> = self
            .jobs
            .iter()
            .filter(|&(_, tracked)| tracked.is_done())
            .map(|(url, _)| url.clone())
            .collect();

        done.iter()
            .filter_map(|url| self.jobs.remove(url))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn contains(&self, job_url: &str) -> bool {
        self.jobs.contains_key(job_url)
    }

    pub fn get(&self, job_url: &str) -> Option<&TrackedBuildJob> {
        self.jobs.get(job_url)
    }

    pub fn tracked_urls(&self) -> Vec<String> {
        self.jobs.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use failure::Error;
    use model::{BuildStatus, ElementIdentity, JobKey};
    use std::cell::Cell;
    use std::rc::Rc;

    // Rejects triggers for any job whose url contains `broken`.
    struct FlakyServer {
        triggered: Cell<u32>,
    }

    impl RequestManager for FlakyServer {
        fn run_parameterized_build(&self, job: &Job, _params: &BTreeMap<String, String>) -> Result<(), Error> {
            if job.url().contains("broken") {
                return Err(format_err!("HTTP 403 for {}", job.url()));
            }
            self.triggered.set(self.triggered.get() + 1);
            Ok(())
        }
    }

    fn job(name: &str) -> Job {
        Job::new(ElementIdentity {
            name: name.to_string(),
            url: format!("http://ci/job/{}/", name),
            ..ElementIdentity::default()
        })
    }

    fn tracked(name: &str, remaining_tries: u32, calls: &Rc<Cell<u32>>) -> TrackedBuildJob {
        let counter = calls.clone();
        TrackedBuildJob::new(
            JobKey::new(name, &format!("http://ci/job/{}/", name)),
            remaining_tries,
            Box::new(move || counter.set(counter.get() + 1)),
        )
    }

    fn finished(job: &str, number: i64, status: BuildStatus) -> (String, Build) {
        let url = format!("http://ci/job/{}/{}/", job, number);
        let build = Build {
            id: number.to_string(),
            number: number,
            url: url.clone(),
            building: false,
            status: status,
            timestamp: None,
            duration: None,
            job: None,
        };
        (url, build)
    }

    #[test]
    fn registering_the_same_job_twice_keeps_one_entry() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = JobRegistry::new();

        registry.register(tracked("api", 1, &calls));
        registry.register(tracked("api", 4, &calls));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("http://ci/job/api/").map(|t| t.remaining_tries()), Some(4));
    }

    #[test]
    fn every_job_sees_every_build_before_pruning() {
        let api_calls = Rc::new(Cell::new(0));
        let web_calls = Rc::new(Cell::new(0));
        let mut registry = JobRegistry::new();
        registry.register(tracked("api", 2, &api_calls));
        registry.register(tracked("web", 2, &web_calls));

        let builds: HashMap<String, Build> = vec![
            finished("api", 5, BuildStatus::Success),
            finished("web", 9, BuildStatus::Failure),
        ].into_iter()
            .collect();
        let pruned = registry.on_new_finished_builds(&builds);

        assert_eq!(api_calls.get(), 0);
        assert_eq!(web_calls.get(), 1);
        assert_eq!(pruned.len(), 1);
        assert!(pruned[0].passed_any_build());
        assert!(!registry.contains("http://ci/job/api/"));
        assert!(registry.contains("http://ci/job/web/"));
    }

    #[test]
    fn exhausted_jobs_are_pruned_without_a_pass() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = JobRegistry::new();
        registry.register(tracked("api", 1, &calls));

        let builds: HashMap<String, Build> = vec![finished("api", 5, BuildStatus::Failure)].into_iter().collect();
        let pruned = registry.on_new_finished_builds(&builds);

        assert_eq!(calls.get(), 1);
        assert_eq!(pruned.len(), 1);
        assert!(!pruned[0].passed_any_build());
        assert!(registry.is_empty());
    }

    #[test]
    fn retries_stop_at_the_budget_within_one_dispatch() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = JobRegistry::new();
        registry.register(tracked("api", 1, &calls));

        let builds: HashMap<String, Build> = vec![
            finished("api", 5, BuildStatus::Failure),
            finished("api", 6, BuildStatus::Failure),
        ].into_iter()
            .collect();
        let pruned = registry.on_new_finished_builds(&builds);

        assert_eq!(calls.get(), 1);
        assert_eq!(pruned.len(), 1);
    }

    #[test]
    fn each_failed_build_in_a_dispatch_costs_one_retry() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = JobRegistry::new();
        registry.register(tracked("api", 3, &calls));

        let builds: HashMap<String, Build> = vec![
            finished("api", 5, BuildStatus::Failure),
            finished("api", 6, BuildStatus::Failure),
        ].into_iter()
            .collect();
        let pruned = registry.on_new_finished_builds(&builds);

        assert_eq!(calls.get(), 2);
        assert!(pruned.is_empty());
        assert_eq!(registry.get("http://ci/job/api/").map(|t| t.remaining_tries()), Some(1));
    }

    #[test]
    fn empty_cycle_changes_nothing() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = JobRegistry::new();
        registry.register(tracked("api", 2, &calls));

        let pruned = registry.on_new_finished_builds(&HashMap::new());

        assert!(pruned.is_empty());
        assert_eq!(registry.tracked_urls(), vec!["http://ci/job/api/".to_string()]);
    }

    #[test]
    fn failed_first_trigger_skips_only_that_job() {
        let calls = Rc::new(Cell::new(0));
        let server = FlakyServer { triggered: Cell::new(0) };
        let mut registry = JobRegistry::new();
        let params = BTreeMap::new();

        let api = registry.trigger_and_register(&server, &job("api"), &params, tracked("api", 2, &calls));
        let broken = registry.trigger_and_register(&server, &job("broken"), &params, tracked("broken", 2, &calls));
        let web = registry.trigger_and_register(&server, &job("web"), &params, tracked("web", 2, &calls));

        assert!(api && !broken && web);
        assert_eq!(server.triggered.get(), 2);
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains("http://ci/job/broken/"));
    }
}
