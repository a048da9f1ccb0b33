use model::build::{Build, BuildStatus};
use model::health::Health;
use model::job::{ElementIdentity, Job};

/// A folder groups other elements; it never builds on its own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folder {
    pub identity: ElementIdentity,
    pub health: Option<Health>,
}

/// Anything listed under a view's `jobs`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewElement {
    Job(Job),
    Folder(Folder),
}

impl ViewElement {
    pub fn identity(&self) -> &ElementIdentity {
        match *self {
            ViewElement::Job(ref job) => &job.identity,
            ViewElement::Folder(ref folder) => &folder.identity,
        }
    }

    pub fn job_name(&self) -> &str {
        self.identity().job_name()
    }

    pub fn url(&self) -> &str {
        &self.identity().url
    }

    pub fn color(&self) -> &str {
        match *self {
            ViewElement::Job(ref job) => job.color.as_str(),
            ViewElement::Folder(_) => "",
        }
    }

    pub fn status(&self) -> BuildStatus {
        match *self {
            ViewElement::Job(ref job) => job.status(),
            ViewElement::Folder(_) => BuildStatus::Null,
        }
    }

    pub fn is_building(&self) -> bool {
        match *self {
            ViewElement::Job(ref job) => job.is_building(),
            ViewElement::Folder(_) => false,
        }
    }

    pub fn health(&self) -> Option<&Health> {
        match *self {
            ViewElement::Job(ref job) => job.health.as_ref(),
            ViewElement::Folder(ref folder) => folder.health.as_ref(),
        }
    }

    pub fn health_icon_key(&self) -> &str {
        Health::icon_key(self.health())
    }

    pub fn health_description(&self) -> &str {
        match *self {
            ViewElement::Job(ref job) => job.health_description(),
            ViewElement::Folder(ref folder) => folder
                .health
                .as_ref()
                .and_then(|h| h.description.as_ref())
                .map(|d| d.as_str())
                .unwrap_or(""),
        }
    }

    pub fn is_buildable(&self) -> bool {
        match *self {
            ViewElement::Job(ref job) => job.buildable,
            ViewElement::Folder(_) => false,
        }
    }

    pub fn is_in_queue(&self) -> bool {
        match *self {
            ViewElement::Job(ref job) => job.in_queue,
            ViewElement::Folder(_) => false,
        }
    }

    pub fn last_builds(&self) -> &[Build] {
        match *self {
            ViewElement::Job(ref job) => job.last_builds.as_slice(),
            ViewElement::Folder(_) => &[],
        }
    }

    pub fn last_build(&self) -> Option<&Build> {
        self.last_builds().first()
    }

    pub fn has_parameters(&self) -> bool {
        match *self {
            ViewElement::Job(ref job) => job.has_parameters(),
            ViewElement::Folder(_) => false,
        }
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        match *self {
            ViewElement::Job(ref job) => job.has_parameter(name),
            ViewElement::Folder(_) => false,
        }
    }

    pub fn update_content_with(&mut self, updated: &Job) {
        if let ViewElement::Job(ref mut job) = *self {
            job.update_content_with(updated);
        }
    }

    pub fn as_job(&self) -> Option<&Job> {
        match *self {
            ViewElement::Job(ref job) => Some(job),
            ViewElement::Folder(_) => None,
        }
    }
}
