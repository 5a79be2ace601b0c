use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{
        self,
        format::{DefaultFields, Format},
    },
    prelude::*,
};

/// `-q` wins over any `-v` count and keeps only errors.
fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Plain-text layer for `--log-file`, with thread ids and targets.
fn file_layer<S>(file: File) -> fmt::Layer<S, DefaultFields, Format, File> {
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let file_output = log_file
        .map(|path| File::create(path).map(file_layer).map_err(CliError::Io))
        .transpose()?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(level_for(verbosity, quiet))
        .with(stderr_layer)
        .with(file_output)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing::{debug, error, info, trace, warn};

    /// Emits one event per level under `filter` and returns what reached the log file.
    fn captured(filter: LevelFilter) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chargefit.log");
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer(File::create(&path).unwrap()));

        tracing::subscriber::with_default(subscriber, || {
            error!("template load failed");
            warn!("residue skipped");
            info!(residues = 3, "catalog loaded");
            debug!("block scanned");
            trace!("candidate scored");
        });

        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0, false), LevelFilter::WARN);
        assert_eq!(level_for(1, false), LevelFilter::INFO);
        assert_eq!(level_for(2, false), LevelFilter::DEBUG);
        assert_eq!(level_for(7, false), LevelFilter::TRACE);
        assert_eq!(level_for(3, true), LevelFilter::ERROR);
    }

    #[test]
    #[serial]
    fn quiet_keeps_only_errors() {
        let log = captured(level_for(0, true));
        assert!(log.contains("template load failed"));
        assert!(log.contains("ERROR"));
        for dropped in ["residue skipped", "catalog loaded", "block scanned", "candidate scored"] {
            assert!(!log.contains(dropped), "'{}' should be filtered out", dropped);
        }
    }

    #[test]
    #[serial]
    fn quiet_overrides_verbose_count() {
        let log = captured(level_for(3, true));
        assert_eq!(log.lines().count(), 1);
        assert!(log.contains("template load failed"));
    }

    #[test]
    #[serial]
    fn default_level_keeps_warnings() {
        let log = captured(level_for(0, false));
        assert!(log.contains("residue skipped"));
        assert!(!log.contains("catalog loaded"));
    }

    #[test]
    #[serial]
    fn single_verbose_flag_adds_info_with_fields() {
        let log = captured(level_for(1, false));
        assert!(log.contains("catalog loaded"));
        assert!(log.contains("residues=3"));
        assert!(!log.contains("block scanned"));
    }

    #[test]
    #[serial]
    fn file_layer_records_thread_ids_and_target() {
        let log = captured(level_for(3, false));
        assert!(log.contains("candidate scored"));
        assert!(log.contains("ThreadId"));
        assert!(log.contains("logging::tests"));
        assert!(!log.contains("\u{1b}["));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = Path::new("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }

    #[test]
    #[serial]
    fn global_subscriber_installs_once() {
        setup_logging(0, true, None).unwrap();
        error!("global subscriber is live");
    }
}
