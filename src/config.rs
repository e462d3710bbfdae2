//! Run configuration passed explicitly into the entry point

use std::path::{Path, PathBuf};

use log::LevelFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Developer run: database summary, parsed queries and timings are logged
    Local,
    /// Paths derived from the working directory, minimal output
    Deployed,
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub mode: RunMode,
    pub database_dir: PathBuf,
    pub queries_path: PathBuf,
    pub output_path: PathBuf,
}

impl RunConfig {
    pub fn local(
        database_dir: impl Into<PathBuf>,
        queries_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mode: RunMode::Local,
            database_dir: database_dir.into(),
            queries_path: queries_path.into(),
            output_path: output_path.into(),
        }
    }

    /// Deployed layout: `database/`, `params.txt` and `out.txt` sit next to the
    /// workspace directory.
    pub fn deployed(workspace_dir: &Path) -> Self {
        let base = workspace_dir.parent().unwrap_or(workspace_dir);
        Self {
            mode: RunMode::Deployed,
            database_dir: base.join("database"),
            queries_path: base.join("params.txt"),
            output_path: base.join("out.txt"),
        }
    }

    pub fn verbose(&self) -> bool {
        self.mode == RunMode::Local
    }

    /// Default log level when `RUST_LOG` is unset
    pub fn log_level(&self) -> LevelFilter {
        match self.mode {
            RunMode::Local => LevelFilter::Info,
            RunMode::Deployed => LevelFilter::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployed_paths_sit_beside_workspace() {
        let config = RunConfig::deployed(Path::new("/srv/contest/workspace"));

        assert_eq!(config.mode, RunMode::Deployed);
        assert_eq!(config.database_dir, Path::new("/srv/contest/database"));
        assert_eq!(config.queries_path, Path::new("/srv/contest/params.txt"));
        assert_eq!(config.output_path, Path::new("/srv/contest/out.txt"));
        assert!(!config.verbose());
        assert_eq!(config.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_local_is_verbose() {
        let config = RunConfig::local("/data/database", "params.txt", "out.txt");
        assert!(config.verbose());
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert_eq!(config.database_dir, Path::new("/data/database"));
    }
}
