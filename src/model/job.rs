use model::build::{Build, BuildStatus, JobKey};
use model::health::Health;
use model::parameter::JobParameterDefinition;

/// Naming fields shared by jobs and folders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementIdentity {
    pub name: String,
    pub display_name: String,
    pub full_display_name: String,
    pub full_name: String,
    pub url: String,
}

impl ElementIdentity {
    /// Best label for the element: the full display name, then the display
    /// name, then the bare name.
    pub fn job_name(&self) -> &str {
        if !self.full_display_name.is_empty() {
            self.full_display_name.as_str()
        } else if !self.display_name.is_empty() {
            self.display_name.as_str()
        } else {
            self.name.as_str()
        }
    }

    pub fn key(&self) -> JobKey {
        JobKey::new(&self.name, &self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Job {
    pub identity: ElementIdentity,
    pub color: String,
    pub buildable: bool,
    pub in_queue: bool,
    /// Most recent first.
    pub last_builds: Vec<Build>,
    pub health: Option<Health>,
    pub parameters: Vec<JobParameterDefinition>,
}

impl Job {
    pub fn new(identity: ElementIdentity) -> Job {
        Job {
            identity: identity,
            ..Job::default()
        }
    }

    pub fn key(&self) -> JobKey {
        self.identity.key()
    }

    pub fn url(&self) -> &str {
        &self.identity.url
    }

    pub fn job_name(&self) -> &str {
        self.identity.job_name()
    }

    pub fn status(&self) -> BuildStatus {
        BuildStatus::from_color(&self.color)
    }

    pub fn is_building(&self) -> bool {
        BuildStatus::is_animated_color(&self.color)
    }

    pub fn last_build(&self) -> Option<&Build> {
        self.last_builds.first()
    }

    pub fn health_icon_key(&self) -> &str {
        Health::icon_key(self.health.as_ref())
    }

    pub fn health_description(&self) -> &str {
        self.health
            .as_ref()
            .and_then(|h| h.description.as_ref())
            .map(|d| d.as_str())
            .unwrap_or("")
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p.name == name)
    }

    pub fn add_parameter(&mut self, parameter: JobParameterDefinition) {
        self.parameters.push(parameter);
    }

    /// Refreshes the mutable state of this job from a freshly parsed copy of
    /// it. The naming fields are left alone.
    pub fn update_content_with(&mut self, updated: &Job) {
        self.color = updated.color.clone();
        self.health = updated.health.clone();
        self.buildable = updated.buildable;
        self.in_queue = updated.in_queue;
        self.last_builds = updated.last_builds.clone();
        self.parameters = updated.parameters.clone();
    }
}
