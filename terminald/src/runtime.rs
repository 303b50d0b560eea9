//! # Batch Runtime
//!
//! Drives one fresh interpreter per dataset and writes the output protocol:
//! the rendered buffer followed by a `-` separator line.

use std::io::{self, BufRead, Write};

use terminal_core::{TerminalCore, TerminalError};
use terminal_logger::{DatasetId, LogEntry, LogLevel, LogSink};
use thiserror::Error;

use crate::config::{ConfigError, FailurePolicy, TerminalConfig};
use crate::dataset::{Dataset, DatasetError, DatasetReader};

/// Separator line written after every dataset
pub const DATASET_SEPARATOR: &str = "-";

/// Batch runtime error types
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("{index}: {source}")]
    Terminal {
        index: DatasetId,
        #[source]
        source: TerminalError,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// A dataset rejected under [`FailurePolicy::Continue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetFailure {
    pub id: DatasetId,
    pub error: TerminalError,
}

/// Summary of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Count announced by the input header
    pub declared: usize,
    /// Datasets rendered successfully
    pub completed: usize,
    /// Datasets skipped after a rejected symbol
    pub failures: Vec<DatasetFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Batch runtime
pub struct BatchRuntime {
    config: TerminalConfig,
}

impl BatchRuntime {
    /// Creates a runtime after validating the configuration
    pub fn new(config: TerminalConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Runs one dataset through a fresh interpreter and returns the render
    pub fn process(
        &self,
        dataset: &Dataset,
        log: &mut dyn LogSink,
    ) -> Result<String, TerminalError> {
        let mut core = TerminalCore::new().with_marker(self.config.cursor_marker);
        core.feed_logged(&dataset.content, log, Some(dataset.id))?;
        Ok(core.render())
    }

    /// Reads every dataset from `input` and writes the results to `output`
    ///
    /// Reader errors are always fatal: after a malformed line the remaining
    /// input cannot be matched to datasets. Interpreter errors follow the
    /// configured [`FailurePolicy`]. Output written before a fatal error is
    /// left in `output`.
    pub fn run<R: BufRead, W: Write>(
        &self,
        input: R,
        output: &mut W,
        log: &mut dyn LogSink,
    ) -> Result<BatchReport, RuntimeError> {
        let reader = DatasetReader::new(input, self.config.bounds())?;
        let mut report = BatchReport {
            declared: reader.declared(),
            ..BatchReport::default()
        };

        log.log(LogEntry::info("batch started").with_field("datasets", report.declared));

        for dataset in reader {
            let dataset = dataset?;
            match self.process(&dataset, log) {
                Ok(rendered) => {
                    writeln!(output, "{}", rendered)?;
                    writeln!(output, "{}", DATASET_SEPARATOR)?;
                    report.completed += 1;
                }
                Err(error) => match self.config.failure_policy {
                    FailurePolicy::Stop => {
                        log.log(
                            LogEntry::error("dataset failed")
                                .with_source(dataset.id)
                                .with_field("error", error),
                        );
                        return Err(RuntimeError::Terminal {
                            index: dataset.id,
                            source: error,
                        });
                    }
                    FailurePolicy::Continue => {
                        log.log(
                            LogEntry::warn("dataset skipped")
                                .with_source(dataset.id)
                                .with_field("error", error),
                        );
                        writeln!(output, "{}", DATASET_SEPARATOR)?;
                        report.failures.push(DatasetFailure {
                            id: dataset.id,
                            error,
                        });
                    }
                },
            }
        }

        let level = if report.is_clean() {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        log.log(
            LogEntry::new(level, "batch finished")
                .with_field("completed", report.completed)
                .with_field("failed", report.failures.len()),
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use terminal_logger::{MemoryLog, NullLog};

    fn run_with(config: TerminalConfig, input: &str) -> (Result<BatchReport, RuntimeError>, String) {
        let runtime = BatchRuntime::new(config).unwrap();
        let mut out = Vec::new();
        let result = runtime.run(Cursor::new(input.as_bytes()), &mut out, &mut NullLog);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_renders_each_dataset() {
        let (result, out) = run_with(TerminalConfig::default(), "2\nabNc\nabcLLx\n");
        let report = result.unwrap();
        assert_eq!(out, "ab\nc\n-\naxbc\n-\n");
        assert_eq!(report.declared, 2);
        assert_eq!(report.completed, 2);
        assert!(report.is_clean());
    }

    #[test]
    fn test_stop_policy_keeps_earlier_output() {
        let (result, out) = run_with(TerminalConfig::default(), "3\nab\naX\ncd\n");
        assert!(matches!(
            result,
            Err(RuntimeError::Terminal {
                index: DatasetId(1),
                source: TerminalError::InvalidInputSymbol('X')
            })
        ));
        assert_eq!(out, "ab\n-\n");
    }

    #[test]
    fn test_continue_policy_isolates_failure() {
        let config = TerminalConfig {
            failure_policy: FailurePolicy::Continue,
            ..TerminalConfig::default()
        };
        let (result, out) = run_with(config, "3\nab\naX\ncd\n");
        let report = result.unwrap();
        assert_eq!(out, "ab\n-\n-\ncd\n-\n");
        assert_eq!(report.completed, 2);
        assert_eq!(
            report.failures,
            vec![DatasetFailure {
                id: DatasetId::new(1),
                error: TerminalError::InvalidInputSymbol('X')
            }]
        );
    }

    #[test]
    fn test_reader_errors_are_fatal_under_continue() {
        let config = TerminalConfig {
            failure_policy: FailurePolicy::Continue,
            ..TerminalConfig::default()
        };
        let (result, out) = run_with(config, "2\nab\n");
        assert!(matches!(
            result,
            Err(RuntimeError::Dataset(DatasetError::UnexpectedEof { .. }))
        ));
        assert_eq!(out, "ab\n-\n");
    }

    #[test]
    fn test_invalid_header() {
        let (result, out) = run_with(TerminalConfig::default(), "many\nab\n");
        assert!(matches!(
            result,
            Err(RuntimeError::Dataset(DatasetError::InvalidCount(_)))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let (result, out) = run_with(TerminalConfig::default(), "0\n");
        assert_eq!(result.unwrap().completed, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TerminalConfig {
            min_line_length: 4,
            max_line_length: 2,
            ..TerminalConfig::default()
        };
        assert!(matches!(
            BatchRuntime::new(config),
            Err(RuntimeError::Config(ConfigError::InvalidBounds { .. }))
        ));
    }

    #[test]
    fn test_logs_batch_lifecycle() {
        let config = TerminalConfig {
            failure_policy: FailurePolicy::Continue,
            ..TerminalConfig::default()
        };
        let runtime = BatchRuntime::new(config).unwrap();
        let mut log = MemoryLog::new(LogLevel::Info);
        let mut out = Vec::new();
        runtime
            .run(Cursor::new(&b"2\na!\nb\n"[..]), &mut out, &mut log)
            .unwrap();

        let messages: Vec<_> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            ["batch started", "dataset skipped", "batch finished"]
        );

        let skipped = &log.entries()[1];
        assert_eq!(skipped.level, LogLevel::Warn);
        assert_eq!(skipped.source, Some(DatasetId::new(0)));

        let finished = &log.entries()[2];
        assert_eq!(finished.level, LogLevel::Warn);
        assert_eq!(finished.field("failed"), Some("1"));
    }

    #[test]
    fn test_trace_uses_configured_marker() {
        let config = TerminalConfig {
            cursor_marker: '|',
            ..TerminalConfig::default()
        };
        let runtime = BatchRuntime::new(config).unwrap();
        let mut log = MemoryLog::new(LogLevel::Debug);
        let dataset = Dataset {
            id: DatasetId::new(0),
            content: "abL".into(),
        };

        assert_eq!(runtime.process(&dataset, &mut log).unwrap(), "ab");
        let last = log.entries().last().unwrap();
        assert_eq!(last.field("preview"), Some("a|b\n"));
    }
}
