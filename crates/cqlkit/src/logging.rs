//! Optional `tracing` subscriber setup for applications that have none.

use std::fmt::Display;

use cqlkit_config::config::Config;
use nu_ansi_term::Color::{self, Blue, Magenta, Red, Yellow};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{
        self,
        format::{FmtSpan, Writer},
        FmtContext, FormatEvent, FormatFields,
    },
    registry::LookupSpan,
};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            color: true,
        }
    }
}

impl From<&Config> for LogConfig {
    fn from(config: &Config) -> Self {
        Self {
            level: config.log_level().to_string(),
            json: config.log_json(),
            color: true,
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

struct Colored<T: Display>(bool, Color, T);

impl<T: Display> Display for Colored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 {
            write!(f, "{}", self.1.prefix())?;
            self.2.fmt(f)?;
            write!(f, "{}", self.1.suffix())
        } else {
            self.2.fmt(f)
        }
    }
}

/// Compact formatter: a colored level tag, then the message. INFO is untagged.
pub struct CustomFormatter {
    pub color: bool,
}

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let color = self.color;
        match *event.metadata().level() {
            Level::TRACE => write!(writer, "{} ", Colored(color, Magenta, "[TRACE]")),
            Level::DEBUG => write!(writer, "{} ", Colored(color, Blue, "[DEBUG]")),
            Level::INFO => write!(writer, ""),
            Level::WARN => write!(writer, "{} ", Colored(color, Yellow, "[WARN]")),
            Level::ERROR => write!(writer, "{} ", Colored(color, Red, "[ERROR]")),
        }?;

        if let Some(message) = visitor.message {
            writeln!(writer, "{message}")
        } else {
            writeln!(writer)
        }
    }
}

/// Installs a global subscriber writing to stderr.
pub fn setup_logging(config: &LogConfig) -> Result<()> {
    let level = &config.level;
    let builder = fmt::Subscriber::builder()
        .with_env_filter(format!("cqlkit={level},cqlkit_config={level}"))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .without_time();

    let subscriber: Box<dyn Subscriber + Send + Sync> = if config.json {
        Box::new(builder.json().flatten_event(true).finish())
    } else {
        Box::new(
            builder
                .event_format(CustomFormatter {
                    color: config.color,
                })
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing::{debug, info, warn};

    use super::*;
    use crate::test_utils::capture_logs;

    fn capture(color: bool, f: impl FnOnce()) -> String {
        capture_logs(color, f).1
    }

    #[test]
    fn test_level_tags() {
        let output = capture(false, || {
            info!("plain");
            debug!("compiled");
            warn!("'select' is a reserved word in CQL");
        });

        assert_eq!(
            output,
            "plain\n[DEBUG] compiled\n[WARN] 'select' is a reserved word in CQL\n"
        );
    }

    #[test]
    fn test_colored_tags() {
        let output = capture(true, || warn!("careful"));
        assert_eq!(
            output,
            format!("{}[WARN]{} careful\n", Yellow.prefix(), Yellow.suffix())
        );
    }

    #[test]
    fn test_second_subscriber_is_rejected() {
        let config = LogConfig {
            color: false,
            ..LogConfig::default()
        };
        let _ = setup_logging(&config);

        let result = setup_logging(&config);
        assert!(matches!(result, Err(crate::error::Error::Logging(_))));
    }

    #[test]
    fn test_log_config_from_config() {
        let mut config = Config::default_config();
        config.log_level = Some("debug".to_string());
        config.log_json = Some(true);

        let log_config = LogConfig::from(&config);
        assert_eq!(log_config.level, "debug");
        assert!(log_config.json);
    }
}
