use model::{BuildStatus, ViewElement};

/// Tally of job states across a view, by the color each job reports.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BuildStatusAggregator {
    pub jobs: usize,
    pub broken: usize,
    pub unstable: usize,
    pub succeeded: usize,
    pub aborted: usize,
}

impl BuildStatusAggregator {
    pub fn from_elements(elements: &[ViewElement]) -> BuildStatusAggregator {
        let mut aggregator = BuildStatusAggregator {
            jobs: elements.len(),
            ..BuildStatusAggregator::default()
        };
        for element in elements {
            aggregator.visit(element.status());
        }
        aggregator
    }

    fn visit(&mut self, status: BuildStatus) {
        match status {
            BuildStatus::Failure => self.broken += 1,
            BuildStatus::Unstable => self.unstable += 1,
            BuildStatus::Success => self.succeeded += 1,
            BuildStatus::Aborted => self.aborted += 1,
            BuildStatus::Building | BuildStatus::Unknown | BuildStatus::Null => {}
        }
    }

    pub fn sum_all(&self) -> usize {
        self.succeeded + self.unstable + self.broken + self.aborted
    }

    pub fn has_no_results(&self) -> bool {
        self.jobs == 0 || self.sum_all() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{Folder, Job};

    fn job_with_color(color: &str) -> ViewElement {
        let mut job = Job::default();
        job.color = color.to_string();
        ViewElement::Job(job)
    }

    #[test]
    fn counts_follow_job_colors() {
        let elements = vec![
            job_with_color("blue"),
            job_with_color("blue_anime"),
            job_with_color("red"),
            job_with_color("yellow"),
            job_with_color("aborted"),
            job_with_color("disabled"),
            ViewElement::Folder(Folder::default()),
        ];

        let aggregator = BuildStatusAggregator::from_elements(&elements);

        assert_eq!(aggregator.jobs, 7);
        assert_eq!(aggregator.succeeded, 2);
        assert_eq!(aggregator.broken, 1);
        assert_eq!(aggregator.unstable, 1);
        assert_eq!(aggregator.aborted, 1);
        assert_eq!(aggregator.sum_all(), 5);
        assert!(!aggregator.has_no_results());
    }

    #[test]
    fn nothing_built_means_no_results() {
        assert!(BuildStatusAggregator::from_elements(&[]).has_no_results());
        assert!(BuildStatusAggregator::from_elements(&[job_with_color("notbuilt")]).has_no_results());
    }
}
