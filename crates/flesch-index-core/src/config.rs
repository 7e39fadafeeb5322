//! Layered configuration.
//!
//! Settings are merged lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. the user file, `config.<ext>` in the platform config directory
//!    (`~/.config/flesch-index/` on Linux)
//! 3. project files from the closest directory, walking up from the search
//!    root, that contains any of `.flesch.<ext>`, `flesch.<ext>`,
//!    `.flesch-index.<ext>` or `flesch-index.<ext>`
//! 4. explicit files (`--config`)
//! 5. `FLESCH_INDEX_*` environment variables
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`. Inside one directory every
//! match is merged in the order listed, extensions in that same order, so
//! `flesch-index.json` has the last word. The walk stops after the first
//! directory holding the boundary marker (`.git` by default).
//!
//! ```no_run
//! use camino::Utf8Path;
//! use flesch_index_core::config::ConfigLoader;
//!
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(Utf8Path::new("."))
//!     .load()?;
//! for (kind, path) in sources.iter() {
//!     println!("{kind:?}: {path}");
//! }
//! println!("min score: {:?}", config.min_score);
//! # Ok::<(), flesch_index_core::ConfigError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

const APP_NAME: &str = "flesch-index";
const FILE_STEMS: [&str; 2] = ["flesch", "flesch-index"];
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];
const ENV_PREFIX: &str = "FLESCH_INDEX_";
const DEFAULT_BOUNDARY: &str = ".git";

/// Effective settings for flesch-index.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default log level when neither `RUST_LOG` nor `-q`/`-v` is given.
    pub log_level: LogLevel,
    /// Directory for JSONL log files. Unset means stderr only.
    pub log_dir: Option<Utf8PathBuf>,
    /// Where chart PNGs go. Unset means `charts/` under the user data directory.
    pub chart_dir: Option<Utf8PathBuf>,
    /// Reading Ease below which `score` fails.
    pub min_score: Option<f64>,
    /// Force markdown stripping on or off. Unset decides by file extension.
    pub strip_markdown: Option<bool>,
    /// Largest input file accepted, in bytes.
    pub max_input_bytes: Option<usize>,
    /// Accept inputs of any size, ignoring `max_input_bytes`.
    pub disable_input_limit: bool,
}

impl Config {
    /// Size limit to enforce on input files, if any.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
    }

    /// How inputs are treated before segmenting.
    pub const fn markdown_policy(&self) -> MarkdownPolicy {
        match self.strip_markdown {
            Some(true) => MarkdownPolicy::Always,
            Some(false) => MarkdownPolicy::Never,
            None => MarkdownPolicy::ByExtension,
        }
    }
}

/// When markdown is reduced to prose before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkdownPolicy {
    /// Every input.
    Always,
    /// No input.
    Never,
    /// Only `.md` and `.markdown` files.
    ByExtension,
}

impl MarkdownPolicy {
    /// Whether `path` should be stripped under this policy.
    pub fn strips(self, path: &Utf8Path) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::ByExtension => matches!(path.extension(), Some("md" | "markdown")),
        }
    }

    /// Human-readable description.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
            Self::ByExtension => ".md files only",
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-document counts.
    Debug,
    /// Default.
    #[default]
    Info,
    /// Only warnings and errors.
    Warn,
    /// Only errors.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Where a loaded config file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Platform config directory.
    User,
    /// Found by walking up from the search root.
    Project,
    /// Named explicitly, e.g. with `--config`.
    Explicit,
}

/// Config files that contributed to a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// User config file, if one was found.
    pub user_file: Option<Utf8PathBuf>,
    /// Project files, lowest precedence first.
    pub project_files: Vec<Utf8PathBuf>,
    /// Explicit files, lowest precedence first.
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Every file in merge order, lowest precedence first.
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, &Utf8Path)> {
        let user = self
            .user_file
            .iter()
            .map(|p| (SourceKind::User, p.as_path()));
        let project = self
            .project_files
            .iter()
            .map(|p| (SourceKind::Project, p.as_path()));
        let explicit = self
            .explicit_files
            .iter()
            .map(|p| (SourceKind::Explicit, p.as_path()));
        user.chain(project).chain(explicit)
    }
}

/// Builder that discovers and merges configuration.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    boundary: Option<String>,
    explicit: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with user config enabled, `.git` as boundary and no search root.
    pub fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            boundary: Some(DEFAULT_BOUNDARY.to_string()),
            explicit: Vec::new(),
        }
    }

    /// Walk up from `dir` looking for project files.
    pub fn with_project_search(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Stop the walk after a directory containing `marker`.
    pub fn with_boundary_marker(mut self, marker: impl Into<String>) -> Self {
        self.boundary = Some(marker.into());
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary = None;
        self
    }

    /// Merge `path` after everything discovered. Later calls win.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.explicit.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source and deserialize the result.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = ConfigSources {
            user_file: self.user_config.then(user_config_file).flatten(),
            project_files: self
                .search_root
                .as_deref()
                .map(|root| discover_project_files(root, self.boundary.as_deref()))
                .unwrap_or_default(),
            explicit_files: self.explicit,
        };

        let figment = sources.iter().fold(
            Figment::from(Serialized::defaults(Config::default())),
            |figment, (kind, path)| {
                tracing::debug!(?kind, %path, "merging config file");
                merge_file(figment, path)
            },
        );

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true))
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;

        tracing::debug!(
            files = sources.iter().count(),
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

/// Project file names in merge order.
fn project_file_names() -> impl Iterator<Item = String> {
    FILE_STEMS.into_iter().flat_map(|stem| {
        [".", ""].into_iter().flat_map(move |dot| {
            EXTENSIONS
                .into_iter()
                .map(move |ext| format!("{dot}{stem}.{ext}"))
        })
    })
}

/// Every project file in the closest directory that has one.
fn discover_project_files(start: &Utf8Path, boundary: Option<&str>) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = project_file_names()
            .map(|name| dir.join(name))
            .filter(|path| path.is_file())
            .collect();
        if !found.is_empty() {
            return found;
        }
        if boundary.is_some_and(|marker| dir.join(marker).exists()) {
            break;
        }
    }
    Vec::new()
}

fn user_config_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .into_iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Merge one file, choosing the provider by extension. Unknown extensions are read as TOML.
fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => figment.merge(Toml::file_exact(path)),
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Platform config directory for flesch-index, e.g. `~/.config/flesch-index`.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(project_dirs()?.config_dir().to_path_buf()).ok()
}

/// Platform data directory for flesch-index, e.g. `~/.local/share/flesch-index`.
pub fn user_data_dir() -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(project_dirs()?.data_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn tmp_root() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        (tmp, root)
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn isolated() -> ConfigLoader {
        ConfigLoader::new().with_user_config(false)
    }

    #[test]
    fn defaults_without_sources() {
        let _lock = env_lock();
        let (config, sources) = isolated().without_boundary_marker().load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.markdown_policy(), MarkdownPolicy::ByExtension);
        assert_eq!(config.input_limit(), Some(crate::DEFAULT_MAX_INPUT_BYTES));
        assert_eq!(sources.iter().count(), 0);
    }

    #[test]
    fn project_file_names_in_merge_order() {
        let names: Vec<String> = project_file_names().collect();
        assert_eq!(names.len(), 16);
        assert_eq!(names[0], ".flesch.toml");
        assert_eq!(names[4], "flesch.toml");
        assert_eq!(names[8], ".flesch-index.toml");
        assert_eq!(names[15], "flesch-index.json");
    }

    #[test]
    fn scoring_settings_from_toml() {
        let _lock = env_lock();
        let (_tmp, root) = tmp_root();
        let path = root.join("settings.toml");
        fs::write(
            &path,
            "chart_dir = \"/tmp/flesch-charts\"\nmin_score = 55.5\nstrip_markdown = true\n",
        )
        .unwrap();

        let (config, sources) = isolated().with_file(&path).load().unwrap();
        assert_eq!(config.chart_dir.as_deref(), Some(Utf8Path::new("/tmp/flesch-charts")));
        assert_eq!(config.min_score, Some(55.5));
        assert_eq!(config.markdown_policy(), MarkdownPolicy::Always);
        assert_eq!(
            sources.iter().collect::<Vec<_>>(),
            vec![(SourceKind::Explicit, path.as_path())]
        );
    }

    #[test]
    fn yaml_then_json_explicit_files() {
        let _lock = env_lock();
        let (_tmp, root) = tmp_root();
        let yaml = root.join("a.yaml");
        fs::write(&yaml, "min_score: 40\nstrip_markdown: false\n").unwrap();
        let json = root.join("b.json");
        fs::write(&json, r#"{ "min_score": 70.0 }"#).unwrap();

        let (config, _) = isolated().with_file(&yaml).with_file(&json).load().unwrap();
        assert_eq!(config.min_score, Some(70.0));
        assert_eq!(config.markdown_policy(), MarkdownPolicy::Never);
    }

    #[test]
    fn input_limit_can_be_disabled() {
        let (_tmp, root) = tmp_root();
        let path = root.join("limits.toml");
        fs::write(&path, "max_input_bytes = 1024\ndisable_input_limit = true\n").unwrap();

        let (config, _) = isolated().with_file(&path).load().unwrap();
        assert_eq!(config.max_input_bytes, Some(1024));
        assert_eq!(config.input_limit(), None);

        let custom = Config {
            max_input_bytes: Some(1024),
            ..Config::default()
        };
        assert_eq!(custom.input_limit(), Some(1024));
    }

    #[test]
    fn markdown_policy_by_extension() {
        let policy = MarkdownPolicy::ByExtension;
        assert!(policy.strips(Utf8Path::new("notes.md")));
        assert!(policy.strips(Utf8Path::new("README.markdown")));
        assert!(!policy.strips(Utf8Path::new("moby.txt")));
        assert!(!policy.strips(Utf8Path::new("md")));
        assert!(MarkdownPolicy::Always.strips(Utf8Path::new("moby.txt")));
        assert!(!MarkdownPolicy::Never.strips(Utf8Path::new("notes.md")));
    }

    #[test]
    fn closest_directory_wins_and_stops_the_walk() {
        let (_tmp, root) = tmp_root();
        let texts = root.join("texts");
        let deep = texts.join("novels");
        fs::create_dir_all(&deep).unwrap();
        fs::write(root.join(".flesch.toml"), "min_score = 30.0\n").unwrap();
        fs::write(texts.join("flesch-index.yaml"), "log_level: warn\n").unwrap();

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(&deep)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.min_score.is_none(), "parent directory must not contribute");
        assert_eq!(sources.project_files, vec![texts.join("flesch-index.yaml")]);
    }

    #[test]
    fn same_directory_files_merge_in_name_order() {
        let (_tmp, root) = tmp_root();
        fs::write(root.join(".flesch.toml"), "min_score = 50.0\nlog_level = \"debug\"\n").unwrap();
        fs::write(root.join("flesch-index.toml"), "log_level = \"error\"\n").unwrap();

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(&root)
            .load()
            .unwrap();

        assert_eq!(config.min_score, Some(50.0));
        assert_eq!(config.log_level, LogLevel::Error);
        let kinds: Vec<SourceKind> = sources.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![SourceKind::Project, SourceKind::Project]);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let (_tmp, root) = tmp_root();
        let repo = root.join("repo");
        let src = repo.join("src");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(root.join(".flesch-index.toml"), "min_score = 90.0\n").unwrap();

        let (config, sources) = isolated().with_project_search(&src).load().unwrap();
        assert!(config.min_score.is_none());
        assert!(sources.project_files.is_empty());

        fs::write(repo.join("flesch.json"), r#"{ "min_score": 45 }"#).unwrap();
        let (config, _) = isolated().with_project_search(&src).load().unwrap();
        assert_eq!(config.min_score, Some(45.0));
    }

    #[test]
    fn explicit_file_is_primary_over_project() {
        let (_tmp, root) = tmp_root();
        fs::write(root.join(".flesch-index.toml"), "min_score = 20.0\n").unwrap();
        let explicit = root.join("strict.toml");
        fs::write(&explicit, "min_score = 80.0\n").unwrap();

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(&root)
            .with_file(&explicit)
            .load()
            .unwrap();

        assert_eq!(config.min_score, Some(80.0));
        assert_eq!(
            sources.iter().last(),
            Some((SourceKind::Explicit, explicit.as_path()))
        );
    }

    #[test]
    fn invalid_value_is_deserialize_error() {
        let (_tmp, root) = tmp_root();
        let path = root.join("bad.toml");
        fs::write(&path, "min_score = \"high\"\n").unwrap();

        let result = isolated().with_file(&path).load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn user_dirs_name_the_app() {
        for dir in [user_config_dir(), user_data_dir()].into_iter().flatten() {
            assert!(dir.as_str().contains(APP_NAME));
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn environment_overrides_files() {
        let _lock = env_lock();

        let (_tmp, root) = tmp_root();
        let path = root.join("plain.toml");
        fs::write(&path, "strip_markdown = false\n").unwrap();

        // SAFETY: test-only; the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("FLESCH_INDEX_STRIP_MARKDOWN", "true");
        }
        let result = isolated().with_file(&path).load();
        // SAFETY: cleanup under the same lock.
        unsafe {
            std::env::remove_var("FLESCH_INDEX_STRIP_MARKDOWN");
        }

        let (config, _) = result.unwrap();
        assert_eq!(config.markdown_policy(), MarkdownPolicy::Always);
    }
}
