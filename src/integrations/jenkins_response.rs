//! Shapes of the documents returned by the Jenkins JSON API.
//!
//! Jenkins omits fields freely, reports booleans as strings on some versions
//! and switches between objects and arrays for `lastBuild`/`healthReport`
//! depending on the `tree=` projection, so almost every field here is lenient.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize, Debug)]
pub struct JenkinsWorkspaceResponse {
    #[serde(rename = "primaryView", default)]
    pub primary_view: Option<JenkinsViewResponse>,
    #[serde(default)]
    pub views: Option<Vec<JenkinsViewResponse>>,
    #[serde(default)]
    pub jobs: Option<Vec<JenkinsViewElementResponse>>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsViewsResponse {
    #[serde(default)]
    pub views: Option<Vec<JenkinsViewResponse>>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsViewResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default)]
    pub views: Option<Vec<JenkinsViewResponse>>,
    #[serde(default)]
    pub jobs: Option<Vec<JenkinsViewElementResponse>>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsJobsResponse {
    #[serde(default)]
    pub jobs: Option<Vec<JenkinsViewElementResponse>>,
}

/// One entry of a `jobs` collection: either a job or a folder, told apart by `_class`.
#[derive(Deserialize, Debug)]
pub struct JenkinsViewElementResponse {
    #[serde(rename = "_class", default, deserialize_with = "lenient_string")]
    pub class: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "displayName", default, deserialize_with = "lenient_string")]
    pub display_name: String,
    #[serde(rename = "fullDisplayName", default, deserialize_with = "lenient_string")]
    pub full_display_name: String,
    #[serde(rename = "fullName", default, deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub buildable: bool,
    #[serde(rename = "inQueue", default, deserialize_with = "lenient_bool")]
    pub in_queue: bool,
    #[serde(rename = "lastBuild", default)]
    pub last_build: Option<OneOrMany<JenkinsBuildResponse>>,
    #[serde(rename = "healthReport", default)]
    pub health_report: Option<OneOrMany<JenkinsHealthResponse>>,
    #[serde(default)]
    pub property: Option<Vec<JenkinsPropertyResponse>>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsHealthResponse {
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub description: Option<String>,
    #[serde(rename = "iconUrl", default, deserialize_with = "lenient_optional_string")]
    pub icon_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsPropertyResponse {
    #[serde(rename = "parameterDefinitions", default)]
    pub parameter_definitions: Option<Vec<JenkinsParameterDefinitionResponse>>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsParameterDefinitionResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub parameter_type: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    #[serde(rename = "defaultParameterValue", default)]
    pub default_parameter_value: Option<JenkinsParameterValueResponse>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsParameterValueResponse {
    // Boolean parameters report a JSON bool here.
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub value: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsBuildsResponse {
    #[serde(default)]
    pub builds: Option<Vec<JenkinsBuildResponse>>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsBuildResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub number: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub building: bool,
    #[serde(rename = "result", default, deserialize_with = "lenient_optional_string")]
    pub build_result: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsTestResultResponse {
    #[serde(default)]
    pub suites: Option<Vec<JenkinsTestSuiteResponse>>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsTestSuiteResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default)]
    pub cases: Option<Vec<JenkinsTestCaseResponse>>,
}

#[derive(Deserialize, Debug)]
pub struct JenkinsTestCaseResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "className", default, deserialize_with = "lenient_string")]
    pub class_name: String,
    #[serde(rename = "errorDetails", default, deserialize_with = "lenient_optional_string")]
    pub error_details: Option<String>,
    #[serde(rename = "errorStackTrace", default, deserialize_with = "lenient_optional_string")]
    pub error_stack_trace: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub skipped: bool,
    /// Seconds.
    #[serde(default, deserialize_with = "lenient_float")]
    pub duration: f64,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

// Only a real `true` or the text "true" count; everything else is false.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::String(ref text)) => text.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

// Unreadable build numbers fall back to 0 so one odd build never sinks the document.
fn lenient_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(ref n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(ref text)) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(number.unwrap_or(0))
}

fn lenient_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(ref n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(ref text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}
