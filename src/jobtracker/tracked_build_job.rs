use jobtracker::matcher::belongs_to;
use model::{Build, BuildStatus, JobKey};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Side effect that asks the server for one more build of the tracked job.
pub type Retrigger = Box<dyn FnMut()>;

/// Retry state of one build that was triggered on purpose.
///
/// The job keeps retriggering after every finished build it owns until one
/// of them succeeds or the retry budget runs out.
pub struct TrackedBuildJob {
    job: JobKey,
    remaining_tries: u32,
    passed_any_build: bool,
    retrigger: Retrigger,
}

impl TrackedBuildJob {
    pub fn new(job: JobKey, remaining_tries: u32, retrigger: Retrigger) -> TrackedBuildJob {
        TrackedBuildJob {
            job: job,
            remaining_tries: remaining_tries,
            passed_any_build: false,
            retrigger: retrigger,
        }
    }

    pub fn job(&self) -> &JobKey {
        &self.job
    }

    pub fn remaining_tries(&self) -> u32 {
        self.remaining_tries
    }

    pub fn passed_any_build(&self) -> bool {
        self.passed_any_build
    }

    pub fn should_retry(&self) -> bool {
        self.remaining_tries > 0 && !self.passed_any_build
    }

    pub fn is_done(&self) -> bool {
        !self.should_retry()
    }

    pub fn on_build_finished(&mut self, build: &Build) {
        if !belongs_to(build, &self.job.url) {
            return;
        }

        self.passed_any_build = self.passed_any_build || build.status == BuildStatus::Success;

        if self.should_retry() {
            info!(
                "--Tracker--: Build #{} of {} finished as {:?}, retriggering ({} tries left).",
                build.number,
                self.job.name,
                build.status,
                self.remaining_tries - 1
            );
            (self.retrigger)();
            self.remaining_tries -= 1;
        }
    }
}

impl PartialEq for TrackedBuildJob {
    fn eq(&self, other: &TrackedBuildJob) -> bool {
        self.job.url == other.job.url
    }
}

impl Eq for TrackedBuildJob {}

impl Hash for TrackedBuildJob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.job.url.hash(state);
    }
}

impl fmt::Debug for TrackedBuildJob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TrackedBuildJob")
            .field("job", &self.job)
            .field("remaining_tries", &self.remaining_tries)
            .field("passed_any_build", &self.passed_any_build)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const JOB_URL: &str = "http://ci/job/api/";

    fn finished(url: &str, status: BuildStatus) -> Build {
        Build {
            id: "1".to_string(),
            number: 1,
            url: url.to_string(),
            building: false,
            status: status,
            timestamp: None,
            duration: None,
            job: None,
        }
    }

    fn tracked(remaining_tries: u32) -> (TrackedBuildJob, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let job = TrackedBuildJob::new(
            JobKey::new("api", JOB_URL),
            remaining_tries,
            Box::new(move || counter.set(counter.get() + 1)),
        );
        (job, calls)
    }

    #[test]
    fn failed_build_triggers_a_retry() {
        let (mut job, calls) = tracked(2);

        job.on_build_finished(&finished("http://ci/job/api/7/", BuildStatus::Failure));

        assert_eq!(calls.get(), 1);
        assert_eq!(job.remaining_tries(), 1);
        assert!(!job.is_done());
    }

    #[test]
    fn success_stops_retrying() {
        let (mut job, calls) = tracked(2);

        job.on_build_finished(&finished("http://ci/job/api/7/", BuildStatus::Success));
        job.on_build_finished(&finished("http://ci/job/api/8/", BuildStatus::Failure));

        assert_eq!(calls.get(), 0);
        assert_eq!(job.remaining_tries(), 2);
        assert!(job.passed_any_build());
        assert!(job.is_done());
    }

    #[test]
    fn foreign_builds_are_ignored() {
        let (mut job, calls) = tracked(2);

        job.on_build_finished(&finished("http://ci/job/web/7/", BuildStatus::Failure));
        job.on_build_finished(&finished("http://ci/job/web/8/", BuildStatus::Success));

        assert_eq!(calls.get(), 0);
        assert_eq!(job.remaining_tries(), 2);
        assert!(!job.passed_any_build());
    }

    #[test]
    fn budget_never_goes_below_zero() {
        let (mut job, calls) = tracked(1);

        for number in 0..5 {
            let url = format!("http://ci/job/api/{}/", number);
            job.on_build_finished(&finished(&url, BuildStatus::Aborted));
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(job.remaining_tries(), 0);
        assert!(job.is_done());
    }

    #[test]
    fn zero_budget_is_done_immediately() {
        let (job, _) = tracked(0);
        assert!(job.is_done());
        assert!(!job.should_retry());
    }

    #[test]
    fn any_non_success_retriggers() {
        let (mut job, calls) = tracked(3);

        job.on_build_finished(&finished("http://ci/job/api/1/", BuildStatus::Unstable));
        job.on_build_finished(&finished("http://ci/job/api/2/", BuildStatus::Null));

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn identity_is_the_job_url() {
        let (first, _) = tracked(1);
        let second = TrackedBuildJob::new(JobKey::new("renamed", JOB_URL), 5, Box::new(|| {}));
        let other = TrackedBuildJob::new(JobKey::new("api", "http://ci/job/web/"), 1, Box::new(|| {}));

        assert_eq!(first, second);
        assert_ne!(first, other);
    }
}
