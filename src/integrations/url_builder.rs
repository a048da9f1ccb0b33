use failure::Error;
use reqwest::Url;
use std::collections::BTreeMap;

const API_JSON: &str = "api/json";
const BUILD: &str = "build";
const PARAMETERIZED_BUILD: &str = "buildWithParameters";
const STOP_BUILD: &str = "stop";
const TEST_REPORT: &str = "testReport/api/json";
const CONSOLE_TEXT: &str = "logText/progressiveText";

const BASIC_BUILD_INFO: &str = "id,url,building,result,number,timestamp,duration";
const BASIC_JENKINS_INFO: &str = "nodeName,nodeDescription,primaryView[name,url],views[name,url,views[name,url]]";

fn basic_job_info() -> String {
    format!(
        "_class,name,displayName,fullDisplayName,fullName,url,color,buildable,inQueue,\
         healthReport[description,iconUrl],lastBuild[{build}],\
         property[parameterDefinitions[name,type,defaultParameterValue[value],description,choices]]",
        build = BASIC_BUILD_INFO
    )
}

// Jenkins urls are directories; joining onto one without the trailing slash
// would replace the last segment.
fn as_directory(url: &str) -> Result<Url, Error> {
    let mut directory = url.to_string();
    if !directory.ends_with('/') {
        directory.push('/');
    }
    Url::parse(&directory).map_err(|e| format_err!("Unable to parse url: {}. Details: {}", url, e))
}

fn api_url(base: &str, tree: &str) -> Result<Url, Error> {
    let mut url = as_directory(base)?.join(API_JSON)?;
    url.query_pairs_mut().append_pair("tree", tree);
    Ok(url)
}

pub fn workspace_url(server_url: &str) -> Result<Url, Error> {
    api_url(server_url, BASIC_JENKINS_INFO)
}

pub fn view_url(view_url: &str) -> Result<Url, Error> {
    api_url(view_url, &format!("name,url,jobs[{}]", basic_job_info()))
}

pub fn job_url(job_url: &str) -> Result<Url, Error> {
    api_url(job_url, &basic_job_info())
}

pub fn build_url(build_url: &str) -> Result<Url, Error> {
    api_url(build_url, BASIC_BUILD_INFO)
}

pub fn builds_url(job_url: &str) -> Result<Url, Error> {
    api_url(job_url, &format!("builds[{}]", BASIC_BUILD_INFO))
}

pub fn test_report_url(build_url: &str) -> Result<Url, Error> {
    Ok(as_directory(build_url)?.join(TEST_REPORT)?)
}

pub fn console_text_url(build_url: &str) -> Result<Url, Error> {
    Ok(as_directory(build_url)?.join(CONSOLE_TEXT)?)
}

pub fn stop_build_url(build_url: &str) -> Result<Url, Error> {
    Ok(as_directory(build_url)?.join(STOP_BUILD)?)
}

/// `<job>/build` when there is nothing to pass, `<job>/buildWithParameters` otherwise.
pub fn run_job_url(job_url: &str, delay_secs: u32, params: &BTreeMap<String, String>) -> Result<Url, Error> {
    let endpoint = if params.is_empty() { BUILD } else { PARAMETERIZED_BUILD };
    let mut url = as_directory(job_url)?.join(endpoint)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("delay", &format!("{}sec", delay_secs));
        for (name, value) in params {
            query.append_pair(name, value);
        }
    }
    Ok(url)
}
