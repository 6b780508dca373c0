use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "ISSUE_ANALYSIS";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub file_path: PathBuf,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Values supplied on the command line. They win over every file and
/// environment source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub file_path: Option<PathBuf>,
    pub user: Option<String>,
    pub label: Option<String>,
    pub creator: Option<String>,
}

impl AppConfig {
    pub fn load_from_path<P: AsRef<Path>>(
        path: P,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base = path.as_ref();
        Config::builder()
            .add_source(
                File::with_name(base.join("config").to_string_lossy().as_ref()).required(false),
            )
            .add_source(
                File::with_name(base.join("config/default").to_string_lossy().as_ref())
                    .required(false),
            )
            .add_source(
                File::with_name(base.join("config/local").to_string_lossy().as_ref())
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_override_option(
                "file_path",
                overrides
                    .file_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("user", overrides.user.clone())?
            .set_override_option("label", overrides.label.clone())?
            .set_override_option("creator", overrides.creator.clone())?
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "ReportConfig::default_top_creators")]
    pub top_creators: usize,
    #[serde(default = "ReportConfig::default_top_labels")]
    pub top_labels: usize,
    #[serde(default = "ReportConfig::default_histogram_bins")]
    pub histogram_bins: usize,
}

impl ReportConfig {
    const fn default_top_creators() -> usize {
        50
    }

    const fn default_top_labels() -> usize {
        10
    }

    const fn default_histogram_bins() -> usize {
        20
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_creators: Self::default_top_creators(),
            top_labels: Self::default_top_labels(),
            histogram_bins: Self::default_histogram_bins(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};

    // process environment is shared by every test in this binary
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn reads_file_path_from_json_config() {
        let _env = env_guard();
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"file_path": "data/issues.json", "label": "bug"}"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from_path(dir.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(cfg.file_path, PathBuf::from("data/issues.json"));
        assert_eq!(cfg.label.as_deref(), Some("bug"));
        assert_eq!(cfg.user, None);
        assert_eq!(cfg.report.top_creators, 50);
        assert_eq!(cfg.report.histogram_bins, 20);
    }

    #[test]
    fn overrides_win_over_files() {
        let _env = env_guard();
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/default.toml"),
            "file_path = \"from-file.json\"\nuser = \"alice\"\n\n[report]\ntop_labels = 3\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            file_path: Some(PathBuf::from("from-cli.json")),
            ..ConfigOverrides::default()
        };
        let cfg = AppConfig::load_from_path(dir.path(), &overrides).unwrap();
        assert_eq!(cfg.file_path, PathBuf::from("from-cli.json"));
        assert_eq!(cfg.user.as_deref(), Some("alice"));
        assert_eq!(cfg.report.top_labels, 3);
    }

    #[test]
    fn missing_file_path_is_an_error() {
        let _env = env_guard();
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from_path(dir.path(), &ConfigOverrides::default()).is_err());
    }

    #[test]
    fn prefixed_environment_variables_are_read() {
        let _env = env_guard();
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"file_path": "file.json", "report": {"top_labels": 7}}"#,
        )
        .unwrap();

        std::env::set_var("ISSUE_ANALYSIS__FILE_PATH", "env.json");
        std::env::set_var("ISSUE_ANALYSIS__REPORT__TOP_LABELS", "3");
        let loaded = AppConfig::load_from_path(dir.path(), &ConfigOverrides::default());
        std::env::remove_var("ISSUE_ANALYSIS__FILE_PATH");
        std::env::remove_var("ISSUE_ANALYSIS__REPORT__TOP_LABELS");

        let cfg = loaded.unwrap();
        assert_eq!(cfg.file_path, PathBuf::from("env.json"));
        assert_eq!(cfg.report.top_labels, 3);
        assert_eq!(cfg.report.top_creators, 50);
    }
}
