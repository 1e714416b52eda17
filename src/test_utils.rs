/*
 * Test utilities and mock helpers for Markpad
 *
 * This module provides common test utilities, mock objects, and helper
 * functions that can be used across different test modules.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::app::App;
    use crate::config::{JournalConfig, MarkTypeOption};
    use crate::draft::{GradeSubmission, SubmissionSink};

    /// Sink that accepts everything and records nothing.
    pub struct NullSink;

    impl SubmissionSink for NullSink {
        fn submit(&mut self, _submission: &GradeSubmission) -> anyhow::Result<()> {
            Ok(())
        }
    }

    pub fn create_test_app() -> App {
        create_test_app_with_sink(Box::new(NullSink))
    }

    pub fn create_test_app_with_sink(sink: Box<dyn SubmissionSink>) -> App {
        App::new("Закиров Асхат".to_string(), JournalConfig::default(), sink)
    }

    /// Small two-type catalog for config-shape tests.
    pub fn create_test_config() -> JournalConfig {
        JournalConfig {
            marks: vec!["2".to_string(), "3".to_string(), "4".to_string(), "5".to_string()],
            mark_types: vec![
                MarkTypeOption::unset(),
                MarkTypeOption {
                    value: "exam".to_string(),
                    label: "Экзамен".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use crate::config::validate_config;

    #[test]
    fn test_create_test_app_uses_defaults() {
        let app = create_test_app();
        assert_eq!(app.student, "Закиров Асхат");
        assert_eq!(app.mark_options.len(), 5);
        assert!(!app.mark_types.is_empty());
    }

    #[test]
    fn test_create_test_config_is_valid() {
        assert!(validate_config(&create_test_config()).is_ok());
    }
}
