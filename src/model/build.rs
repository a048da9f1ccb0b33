use chrono::{DateTime, TimeZone, Utc};

/// Identity of a job as seen from one of its builds: enough to display or
/// look the job up again, never used to decide ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JobKey {
    pub name: String,
    pub url: String,
}

impl JobKey {
    pub fn new(name: &str, url: &str) -> JobKey {
        JobKey {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    Success,
    Failure,
    Unstable,
    Aborted,
    Building,
    Unknown,
    Null,
}

// Prefix of the job color Jenkins reports for each status. Checked in order.
const STATUS_BY_COLOR: &[(&str, BuildStatus)] = &[
    ("red", BuildStatus::Failure),
    ("yellow", BuildStatus::Unstable),
    ("aborted", BuildStatus::Aborted),
    ("blue", BuildStatus::Success),
    ("disabled", BuildStatus::Null),
];

const ANIMATED_COLOR_SUFFIX: &str = "_anime";

impl BuildStatus {
    /// Maps the `result` field of a build. Jenkins leaves it null while the
    /// build runs, so the `building` flag decides what an absent result means.
    pub fn from_result(result: Option<&str>, building: bool) -> BuildStatus {
        let result = match result {
            Some(r) if !r.is_empty() && !r.eq_ignore_ascii_case("null") => r,
            _ => {
                return if building {
                    BuildStatus::Building
                } else {
                    BuildStatus::Unknown
                };
            }
        };

        match result.to_ascii_uppercase().as_str() {
            "SUCCESS" => BuildStatus::Success,
            "FAILURE" => BuildStatus::Failure,
            "UNSTABLE" => BuildStatus::Unstable,
            "ABORTED" => BuildStatus::Aborted,
            other => {
                debug!("--Jenkins--: Unsupported build result: {}", other);
                BuildStatus::Null
            }
        }
    }

    pub fn from_color(color: &str) -> BuildStatus {
        STATUS_BY_COLOR
            .iter()
            .find(|&&(prefix, _)| color.starts_with(prefix))
            .map(|&(_, status)| status)
            .unwrap_or(BuildStatus::Null)
    }

    pub fn is_animated_color(color: &str) -> bool {
        color.ends_with(ANIMATED_COLOR_SUFFIX)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    pub id: String,
    pub number: i64,
    pub url: String,
    pub building: bool,
    pub status: BuildStatus,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
    /// Milliseconds.
    pub duration: Option<i64>,
    pub job: Option<JobKey>,
}

impl Build {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }

    pub fn is_after(&self, other: &Build) -> bool {
        self.number > other.number
    }

    pub fn is_finished(&self) -> bool {
        !self.building
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_maps_to_status_case_insensitively() {
        assert_eq!(BuildStatus::from_result(Some("SUCCESS"), false), BuildStatus::Success);
        assert_eq!(BuildStatus::from_result(Some("failure"), false), BuildStatus::Failure);
        assert_eq!(BuildStatus::from_result(Some("Unstable"), false), BuildStatus::Unstable);
        assert_eq!(BuildStatus::from_result(Some("ABORTED"), false), BuildStatus::Aborted);
    }

    #[test]
    fn missing_result_depends_on_building_flag() {
        assert_eq!(BuildStatus::from_result(None, true), BuildStatus::Building);
        assert_eq!(BuildStatus::from_result(None, false), BuildStatus::Unknown);
        assert_eq!(BuildStatus::from_result(Some("null"), false), BuildStatus::Unknown);
    }

    #[test]
    fn unrecognised_result_is_null() {
        assert_eq!(BuildStatus::from_result(Some("NOT_BUILT"), false), BuildStatus::Null);
    }

    #[test]
    fn color_prefix_decides_status() {
        assert_eq!(BuildStatus::from_color("blue"), BuildStatus::Success);
        assert_eq!(BuildStatus::from_color("red_anime"), BuildStatus::Failure);
        assert_eq!(BuildStatus::from_color("yellow"), BuildStatus::Unstable);
        assert_eq!(BuildStatus::from_color("aborted"), BuildStatus::Aborted);
        assert_eq!(BuildStatus::from_color("notbuilt"), BuildStatus::Null);
        assert_eq!(BuildStatus::from_color(""), BuildStatus::Null);
        assert!(BuildStatus::is_animated_color("blue_anime"));
        assert!(!BuildStatus::is_animated_color("blue"));
    }

    #[test]
    fn started_at_reads_epoch_millis() {
        let build = Build {
            id: "12".to_string(),
            number: 12,
            url: "http://ci/job/a/12/".to_string(),
            building: false,
            status: BuildStatus::Success,
            timestamp: Some(1_500_000_000_000),
            duration: Some(1000),
            job: None,
        };
        let started = build.started_at().expect("timestamp should convert");
        assert_eq!(started.timestamp(), 1_500_000_000);
        assert!(build.is_finished());
    }
}
