extern crate chrono;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate reqwest;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate toml;

pub mod build_status_aggregator;
pub mod build_watcher;
pub mod config_file;
pub mod errors;
pub mod integrations;
pub mod jobtracker;
pub mod model;
pub mod network;

pub use build_status_aggregator::BuildStatusAggregator;
pub use build_watcher::FinishedBuildWatcher;
pub use config_file::Config;
pub use errors::{ConfigurationError, JenkinsRetrievalError};
pub use jobtracker::{JobRegistry, TrackedBuildJob};
