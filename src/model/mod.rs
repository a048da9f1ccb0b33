pub mod build;
pub mod health;
pub mod job;
pub mod parameter;
pub mod test_result;
pub mod view;
pub mod view_element;

pub use self::build::{Build, BuildStatus, JobKey};
pub use self::health::Health;
pub use self::job::{ElementIdentity, Job};
pub use self::parameter::{JobParameterDefinition, JobParameterType};
pub use self::test_result::{TestCase, TestResult, TestSuite};
pub use self::view::{Jenkins, View};
pub use self::view_element::{Folder, ViewElement};
