use model::Build;

/// Whether `build` was produced by the job living at `job_url`.
///
/// This is a plain substring check on the build url, so a job whose url is
/// a prefix of another job's url (`/job/api/` and `/job/api/job/nightly/`)
/// also claims the other job's builds. An empty job url claims every build.
pub fn belongs_to(build: &Build, job_url: &str) -> bool {
    build.url.contains(job_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::BuildStatus;

    fn build_at(url: &str) -> Build {
        Build {
            id: "1".to_string(),
            number: 1,
            url: url.to_string(),
            building: false,
            status: BuildStatus::Failure,
            timestamp: None,
            duration: None,
            job: None,
        }
    }

    #[test]
    fn build_under_job_url_matches() {
        assert!(belongs_to(&build_at("http://ci/job/api/12/"), "http://ci/job/api/"));
    }

    #[test]
    fn build_of_another_job_does_not_match() {
        assert!(!belongs_to(&build_at("http://ci/job/web/12/"), "http://ci/job/api/"));
    }

    #[test]
    fn containment_is_not_a_path_prefix_check() {
        assert!(belongs_to(&build_at("http://ci/job/api/job/nightly/3/"), "http://ci/job/api/"));
        assert!(belongs_to(&build_at("http://mirror/ci/job/api/3/"), "ci/job/api/"));
    }

    #[test]
    fn empty_job_url_matches_everything() {
        assert!(belongs_to(&build_at("http://ci/job/anything/1/"), ""));
    }
}
