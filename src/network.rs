use errors::JenkinsRetrievalError;
use failure::Error;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;

lazy_static! {
    static ref HTTP_CLIENT: Client = Client::new();
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    // Anonymous access when no username is configured.
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        if self.username.is_empty() {
            request
        } else {
            request.basic_auth(&self.username, Some(&self.password))
        }
    }
}

pub fn get_url_body(url: &Url, credentials: &Credentials) -> Result<String, Error> {
    let response = credentials.apply(HTTP_CLIENT.get(url.clone())).send()?;
    let status = response.status();
    if status.is_success() {
        Ok(response.text()?)
    } else {
        Err(JenkinsRetrievalError::HttpError {
            http_error_message: format!("GET {} failed with code: {}", url, status),
        }.into())
    }
}

pub fn post_url(url: &Url, credentials: &Credentials) -> Result<(), Error> {
    let response = credentials.apply(HTTP_CLIENT.post(url.clone())).send()?;
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(JenkinsRetrievalError::HttpError {
            http_error_message: format!("POST {} failed with code: {}", url, status),
        }.into())
    }
}
