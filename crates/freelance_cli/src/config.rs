//! Command-line flags and their environment fallbacks.

use clap::Parser;
use std::path::{Path, PathBuf};

/// Interactive ledger for freelance clients, contracts and money.
#[derive(Debug, Parser)]
#[command(name = "freelance", version)]
pub struct Cli {
    /// SQLite file holding every collection.
    #[arg(long, env = "FREELANCE_DB", default_value = "freelance.sqlite3")]
    pub db: PathBuf,

    /// trace, debug, info, warn or error.
    #[arg(long, env = "FREELANCE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rotating log files [default: ./logs]
    #[arg(long, env = "FREELANCE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Flags resolved against the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Cli {
    pub fn resolve(self, cwd: &Path) -> Settings {
        Settings {
            db_path: absolutize(cwd, self.db),
            log_level: self
                .log_level
                .unwrap_or_else(|| freelance_core::default_log_level().to_string()),
            log_dir: absolutize(cwd, self.log_dir.unwrap_or_else(|| PathBuf::from("logs"))),
        }
    }
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::{Path, PathBuf};

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let cli = Cli::try_parse_from([
            "freelance",
            "--db",
            "data/ledger.sqlite3",
            "--log-dir",
            "/var/log/freelance",
            "--log-level",
            "warn",
        ])
        .unwrap();

        let settings = cli.resolve(Path::new("/home/ana"));
        assert_eq!(settings.db_path, PathBuf::from("/home/ana/data/ledger.sqlite3"));
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/freelance"));
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn log_defaults_follow_build_mode_and_cwd() {
        let cli = Cli {
            db: PathBuf::from("freelance.sqlite3"),
            log_level: None,
            log_dir: None,
        };

        let settings = cli.resolve(Path::new("/work"));
        assert_eq!(settings.log_dir, PathBuf::from("/work/logs"));
        assert_eq!(settings.log_level, freelance_core::default_log_level());
    }
}
