use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingSettings};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when it is set.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    let builder = fmt().with_env_filter(filter).with_target(false);

    let installed = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(|e| e as Box<dyn std::error::Error>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let settings = LoggingSettings {
            level: "btc_leverage_risk=verbose".to_string(),
            format: LogFormat::Compact,
        };
        assert!(init_tracing(&settings).is_err());
    }

    #[test]
    fn test_error_converts_into_caller_result() {
        fn run(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
            init_tracing(settings)?;
            Ok(())
        }

        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let settings = LoggingSettings {
            level: "btc_leverage_risk=verbose".to_string(),
            format: LogFormat::Json,
        };
        let err = run(&settings).unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
