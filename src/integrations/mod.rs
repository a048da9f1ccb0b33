pub mod jenkins_integration;
pub mod jenkins_parser;
pub mod jenkins_response;
pub mod remote_integration;
pub mod url_builder;

pub use self::jenkins_integration::JenkinsIntegration;
pub use self::remote_integration::RequestManager;
