use flexi_logger::{
    filter::{self, LogLineFilter},
    Age, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};

use super::configuration::{LogConfiguration, DEFAULT_LOG_LEVEL, DEFAULT_LOG_RETENTION};

pub struct IgnoreReqwest;

impl LogLineFilter for IgnoreReqwest {
    fn write(
        &self,
        now: &mut flexi_logger::DeferredNow,
        record: &log::Record,
        log_line_writer: &dyn filter::LogLineWriter,
    ) -> std::io::Result<()> {
        let path = record.module_path().unwrap_or_default();

        if is_transport_module(path) {
            return Ok(());
        }

        log_line_writer.write(now, record)
    }
}

fn is_transport_module(path: &str) -> bool {
    path.starts_with("reqwest") || path.starts_with("hyper")
}

/// Starts logging to stderr, or to rotated files when a directory is
/// configured. The returned handle must be kept alive.
pub fn init(conf: &LogConfiguration, debug: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    let level = if debug {
        "debug".to_string()
    } else {
        conf.level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    };

    let logger = Logger::try_with_str(level)?.filter(Box::new(IgnoreReqwest));

    let logger = match &conf.directory {
        Some(directory) => logger
            .log_to_file(FileSpec::default().directory(directory).basename("mb8611"))
            .rotate(
                Criterion::Age(Age::Day),
                Naming::Timestamps,
                Cleanup::KeepLogFiles(conf.retention.unwrap_or(DEFAULT_LOG_RETENTION)),
            )
            .duplicate_to_stderr(Duplicate::Warn),
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::colored_default_format),
    };

    logger.start()
}

#[cfg(test)]
mod tests {
    use super::is_transport_module;

    #[test]
    fn transport_records_are_ignored() {
        assert!(is_transport_module("reqwest::connect"));
        assert!(is_transport_module("hyper_util::client"));
        assert!(!is_transport_module("mb8611::core::client"));
    }
}
