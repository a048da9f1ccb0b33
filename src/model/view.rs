use model::view_element::ViewElement;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    pub name: String,
    pub url: String,
    pub nested: bool,
    pub sub_views: Vec<View>,
    pub elements: Vec<ViewElement>,
}

/// Everything known about one Jenkins server after a workspace load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Jenkins {
    pub name: String,
    pub server_url: String,
    pub primary_view: Option<View>,
    pub views: Vec<View>,
    pub jobs: Vec<ViewElement>,
}

impl Jenkins {
    pub fn new(name: &str, server_url: &str) -> Jenkins {
        Jenkins {
            name: name.to_string(),
            server_url: server_url.to_string(),
            ..Jenkins::default()
        }
    }

    pub fn get_job(&self, name: &str) -> Option<&ViewElement> {
        self.jobs.iter().find(|job| job.job_name() == name)
    }

    pub fn get_view_by_name(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|view| view.name == name)
    }

    pub fn update(&mut self, other: Jenkins) {
        *self = other;
    }
}
