#[derive(Debug, Fail, PartialEq)]
pub enum ConfigurationError {
    #[fail(display = "can't retry more than {} times (asked for {})", limit, requested)]
    RetryLimitExceeded { requested: u32, limit: u32 },
}

#[derive(Debug, Fail)]
pub enum JenkinsRetrievalError {
    #[fail(display = "Empty JSON data!")]
    EmptyJsonData,

    #[fail(display = "Jenkins returned an HTTP error: {}", http_error_message)]
    HttpError { http_error_message: String },
}
