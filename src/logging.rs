use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("cannot create log file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Install(#[from] log::SetLoggerError),
}

/// Sends log output to `path`. The terminal belongs to the UI, so there
/// is no terminal logger; without this call log macros are no-ops.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    let file = File::create(path).map_err(|source| LoggingError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let config = simplelog::ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    simplelog::WriteLogger::init(level, config, file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn unwritable_log_path_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("game.log");
        assert_matches!(
            init_file_logger(&path, LevelFilter::Debug),
            Err(LoggingError::Create { .. })
        );
    }
}
