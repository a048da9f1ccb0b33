use errors::JenkinsRetrievalError;
use failure::Error;
use integrations::jenkins_response::*;
use model::*;
use serde::de::DeserializeOwned;
use serde_json;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ElementKind {
    Job,
    Folder,
}

// Substring of `_class` that selects the element kind. Anything unmatched is a job.
const ELEMENT_KINDS: &[(&str, ElementKind)] = &[("Folder", ElementKind::Folder)];

fn element_kind(class: &str) -> ElementKind {
    ELEMENT_KINDS
        .iter()
        .find(|&&(marker, _)| class.contains(marker))
        .map(|&(_, kind)| kind)
        .unwrap_or(ElementKind::Job)
}

fn read_json<T>(json_data: &str) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    if json_data.is_empty() || json_data == "{}" {
        warn!("--Jenkins--: Empty JSON data!");
        return Err(JenkinsRetrievalError::EmptyJsonData.into());
    }
    serde_json::from_str::<T>(json_data).map_err(|e| {
        warn!(
            "--Jenkins--: Error during parsing JSON data: {}. Details: {}",
            json_data, e
        );
        Error::from(e)
    })
}

pub fn create_workspace(json_data: &str, server_url: &str) -> Result<Jenkins, Error> {
    let workspace: JenkinsWorkspaceResponse = read_json(json_data)?;
    let mut jenkins = Jenkins::new("", server_url);
    jenkins.primary_view = workspace.primary_view.map(|view| to_view(view, false));
    jenkins.views = workspace
        .views
        .unwrap_or_default()
        .into_iter()
        .map(|view| to_view(view, false))
        .collect();
    jenkins.jobs = to_elements(workspace.jobs);
    Ok(jenkins)
}

pub fn create_view(json_data: &str) -> Result<View, Error> {
    let view: JenkinsViewResponse = read_json(json_data)?;
    Ok(to_view(view, false))
}

pub fn create_view_jobs(json_data: &str) -> Result<Vec<ViewElement>, Error> {
    let jobs: JenkinsJobsResponse = read_json(json_data)?;
    Ok(to_elements(jobs.jobs))
}

/// CloudBees wraps the jobs of a view one level deeper, under `views[0].jobs`.
pub fn create_cloudbees_view_jobs(json_data: &str) -> Result<Vec<ViewElement>, Error> {
    let views: JenkinsViewsResponse = read_json(json_data)?;
    let first_view = views.views.and_then(|views| views.into_iter().next());
    Ok(first_view
        .map(|view| to_elements(view.jobs))
        .unwrap_or_default())
}

pub fn create_view_element(json_data: &str) -> Result<ViewElement, Error> {
    let element: JenkinsViewElementResponse = read_json(json_data)?;
    Ok(to_view_element(element))
}

pub fn create_job(json_data: &str) -> Result<Job, Error> {
    let element: JenkinsViewElementResponse = read_json(json_data)?;
    Ok(to_job(element))
}

pub fn create_build(json_data: &str) -> Result<Build, Error> {
    let build: JenkinsBuildResponse = read_json(json_data)?;
    Ok(to_build(build, None))
}

pub fn create_builds(job: &JobKey, json_data: &str) -> Result<Vec<Build>, Error> {
    let builds: JenkinsBuildsResponse = read_json(json_data)?;
    let mut builds: Vec<Build> = builds
        .builds
        .unwrap_or_default()
        .into_iter()
        .map(|build| to_build(build, Some(job.clone())))
        .collect();
    sort_most_recent_first(&mut builds);
    Ok(builds)
}

pub fn create_test_results(json_data: &str) -> Result<TestResult, Error> {
    let report: JenkinsTestResultResponse = read_json(json_data)?;
    Ok(TestResult {
        suites: report
            .suites
            .unwrap_or_default()
            .into_iter()
            .map(to_test_suite)
            .collect(),
    })
}

fn to_view(view: JenkinsViewResponse, nested: bool) -> View {
    View {
        name: view.name,
        url: view.url,
        nested: nested,
        sub_views: view
            .views
            .unwrap_or_default()
            .into_iter()
            .map(|sub_view| to_view(sub_view, true))
            .collect(),
        elements: to_elements(view.jobs),
    }
}

fn to_elements(elements: Option<Vec<JenkinsViewElementResponse>>) -> Vec<ViewElement> {
    elements
        .unwrap_or_default()
        .into_iter()
        .map(to_view_element)
        .collect()
}

fn to_view_element(element: JenkinsViewElementResponse) -> ViewElement {
    match element_kind(&element.class) {
        ElementKind::Folder => ViewElement::Folder(to_folder(element)),
        ElementKind::Job => ViewElement::Job(to_job(element)),
    }
}

fn to_identity(element: &JenkinsViewElementResponse) -> ElementIdentity {
    ElementIdentity {
        name: element.name.clone(),
        display_name: element.display_name.clone(),
        full_display_name: element.full_display_name.clone(),
        full_name: element.full_name.clone(),
        url: element.url.clone(),
    }
}

fn to_folder(element: JenkinsViewElementResponse) -> Folder {
    Folder {
        identity: to_identity(&element),
        health: to_health(element.health_report),
    }
}

fn to_job(element: JenkinsViewElementResponse) -> Job {
    let identity = to_identity(&element);
    let owner = identity.key();

    let mut last_builds: Vec<Build> = element
        .last_build
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|build| to_build(build, Some(owner.clone())))
        .collect();
    sort_most_recent_first(&mut last_builds);

    Job {
        identity: identity,
        color: element.color,
        buildable: element.buildable,
        in_queue: element.in_queue,
        last_builds: last_builds,
        health: to_health(element.health_report),
        parameters: to_parameters(element.property),
    }
}

// Only the first report counts when Jenkins sends several.
fn to_health(report: Option<OneOrMany<JenkinsHealthResponse>>) -> Option<Health> {
    report
        .and_then(|report| report.into_vec().into_iter().next())
        .map(|health| {
            Health::new(
                health.icon_url.as_ref().map(String::as_str),
                health.description.as_ref().map(String::as_str),
            )
        })
}

fn to_parameters(properties: Option<Vec<JenkinsPropertyResponse>>) -> Vec<JobParameterDefinition> {
    properties
        .unwrap_or_default()
        .into_iter()
        .flat_map(|property| property.parameter_definitions.unwrap_or_default())
        .map(|definition| JobParameterDefinition {
            parameter_type: JobParameterType::from_name(&definition.parameter_type),
            name: definition.name,
            description: definition.description,
            default_value: definition.default_parameter_value.and_then(|v| v.value),
            choices: definition.choices.unwrap_or_default(),
        })
        .collect()
}

fn to_build(build: JenkinsBuildResponse, job: Option<JobKey>) -> Build {
    Build {
        status: BuildStatus::from_result(build.build_result.as_ref().map(String::as_str), build.building),
        id: build.id,
        number: build.number,
        url: build.url,
        building: build.building,
        timestamp: build.timestamp,
        duration: build.duration,
        job: job,
    }
}

fn to_test_suite(suite: JenkinsTestSuiteResponse) -> TestSuite {
    TestSuite {
        name: suite.name,
        cases: suite
            .cases
            .unwrap_or_default()
            .into_iter()
            .map(|case| TestCase {
                name: case.name,
                class_name: case.class_name,
                error_details: case.error_details,
                error_stack_trace: case.error_stack_trace,
                skipped: case.skipped,
                duration_secs: case.duration,
            })
            .collect(),
    }
}

fn sort_most_recent_first(builds: &mut Vec<Build>) {
    builds.sort_by(|a, b| b.number.cmp(&a.number));
}
