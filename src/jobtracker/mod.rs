pub mod factory;
pub mod job_registry;
pub mod matcher;
pub mod tracked_build_job;

pub use self::factory::RETRY_LIMIT;
pub use self::job_registry::JobRegistry;
pub use self::tracked_build_job::{Retrigger, TrackedBuildJob};
