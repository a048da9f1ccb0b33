/// Test report attached to one build, grouped by suite.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestResult {
    pub suites: Vec<TestSuite>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestSuite {
    pub name: String,
    pub cases: Vec<TestCase>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestCase {
    pub name: String,
    pub class_name: String,
    pub error_details: Option<String>,
    pub error_stack_trace: Option<String>,
    pub skipped: bool,
    pub duration_secs: f64,
}

impl TestCase {
    pub fn duration_ms(&self) -> i64 {
        (self.duration_secs * 1000.0) as i64
    }

    /// A case failed when it ran and left error details or a stack trace behind.
    pub fn is_failed(&self) -> bool {
        !self.skipped && (self.error_details.is_some() || self.error_stack_trace.is_some())
    }
}

impl TestResult {
    pub fn cases<'a>(&'a self) -> impl Iterator<Item = &'a TestCase> + 'a {
        self.suites.iter().flat_map(|suite| suite.cases.iter())
    }

    pub fn total_count(&self) -> usize {
        self.cases().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.cases().filter(|case| case.skipped).count()
    }

    pub fn failed_cases(&self) -> Vec<&TestCase> {
        self.cases().filter(|case| case.is_failed()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, error: Option<&str>, skipped: bool) -> TestCase {
        TestCase {
            name: name.to_string(),
            class_name: "RegistryTest".to_string(),
            error_details: error.map(|e| e.to_string()),
            skipped: skipped,
            duration_secs: 0.1234,
            ..TestCase::default()
        }
    }

    #[test]
    fn counts_span_every_suite() {
        let result = TestResult {
            suites: vec![
                TestSuite {
                    name: "unit".to_string(),
                    cases: vec![case("a", None, false), case("b", Some("expected 2"), false)],
                },
                TestSuite {
                    name: "slow".to_string(),
                    cases: vec![case("c", Some("timed out"), true)],
                },
            ],
        };

        assert_eq!(result.total_count(), 3);
        assert_eq!(result.skipped_count(), 1);
        let failed: Vec<&str> = result.failed_cases().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(failed, vec!["b"]);
    }

    #[test]
    fn duration_is_truncated_to_millis() {
        assert_eq!(case("a", None, false).duration_ms(), 123);
    }
}
