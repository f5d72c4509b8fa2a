//! Configuration loading and layering

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AutosyncError, AutosyncResult};
use crate::watcher::WatchBackend;

use super::types::Config;

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "autosync.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AutosyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML content; `path` is only used for reporting.
pub fn parse_with_warnings(content: &str, path: &Path) -> AutosyncResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| AutosyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the layered configuration:
/// user config < project config (or `explicit`) < `AUTOSYNC_*` env.
///
/// CLI flags are applied on top by the caller. A missing file is skipped; an
/// unreadable or malformed one is an error.
pub fn load_layered(
    explicit: Option<&Path>,
    working_dir: &Path,
) -> AutosyncResult<(Config, Vec<ConfigWarning>)> {
    let mut config = Config::default();
    let mut warnings = Vec::new();

    if let Some(user_config) = user_config_path() {
        if user_config.is_file() {
            let (layer, w) = load_with_warnings(&user_config)?;
            config = config.merge(layer);
            warnings.extend(w);
        }
    }

    let project = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(working_dir.join(PROJECT_CONFIG_FILE)).filter(|p| p.is_file()),
    };
    if let Some(project) = project {
        let (layer, w) = load_with_warnings(&project)?;
        config = config.merge(layer);
        warnings.extend(w);
    }

    Ok((with_env_overrides(config)?, warnings))
}

/// Apply environment variable overrides (AUTOSYNC_* prefix)
pub fn with_env_overrides(config: Config) -> AutosyncResult<Config> {
    apply_env(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_env(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> AutosyncResult<Config> {
    if let Some(dir) = get_env("AUTOSYNC_LOCAL_DIR") {
        config.local.dir = Some(PathBuf::from(dir));
    }
    if let Some(dir) = get_env("AUTOSYNC_REMOTE_DIR") {
        config.remote.dir = Some(dir);
    }
    if let Some(host) = get_env("AUTOSYNC_REMOTE_HOST") {
        config.remote.host = Some(host);
    }
    if let Some(user) = get_env("AUTOSYNC_REMOTE_USER") {
        config.remote.user = Some(user);
    }
    if let Some(port) = get_env("AUTOSYNC_REMOTE_PORT") {
        config.remote.port = Some(parse_env_number("AUTOSYNC_REMOTE_PORT", &port)?);
    }
    if let Some(extra) = get_env("AUTOSYNC_EXTRA_PARAMS") {
        config.sync.extra_params = Some(extra);
    }
    if let Some(ms) = get_env("AUTOSYNC_INTERVAL_MS") {
        config.sync.interval_ms = Some(parse_env_number("AUTOSYNC_INTERVAL_MS", &ms)?);
    }
    if let Some(val) = get_env("AUTOSYNC_DRY_RUN") {
        config.sync.dry_run = Some(is_truthy(&val));
    }
    if let Some(backend) = get_env("AUTOSYNC_WATCHER") {
        config.watch.backend = match backend.trim().to_lowercase().as_str() {
            "native" | "notify" => Some(WatchBackend::Native),
            "command" => Some(WatchBackend::Command),
            "fswatch" => Some(WatchBackend::Fswatch),
            _ => config.watch.backend,
        };
    }
    Ok(config)
}

fn parse_env_number<T>(key: &'static str, value: &str) -> AutosyncResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| AutosyncError::InvalidEnv {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn is_truthy(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    val != "false" && val != "0" && !val.is_empty()
}

/// `~/.config/autosync/config.toml` (or the platform equivalent)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("autosync").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "local",
        "remote",
        "dir",
        "host",
        "port",
        "user",
        "sync",
        "interval_ms",
        "extra_params",
        "rsync_program",
        "ssh_program",
        "dry_run",
        "requeue_on_failure",
        "watch",
        "backend",
        "command",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
