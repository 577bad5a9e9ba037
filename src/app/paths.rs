// SPDX-License-Identifier: MPL-2.0
//! Location of `settings.toml`.
//!
//! The viewer persists nothing else, so this module only answers one
//! question: which directory holds the settings file. The first match wins:
//!
//! 1. `--config-dir`, registered once at start-up via [`init_cli_override`]
//! 2. the `COMMONS_LENS_CONFIG_DIR` environment variable, when non-empty
//! 3. the platform config directory (`dirs`) with `CommonsLens` appended

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const APP_DIR_NAME: &str = "CommonsLens";

pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Environment variable naming an alternative config directory.
pub const ENV_CONFIG_DIR: &str = "COMMONS_LENS_CONFIG_DIR";

static CLI_OVERRIDE: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers the `--config-dir` value. Later calls are ignored.
pub fn init_cli_override(config_dir: Option<String>) {
    let dir = config_dir
        .filter(|d| !d.trim().is_empty())
        .map(PathBuf::from);
    if CLI_OVERRIDE.set(dir).is_err() {
        log::debug!("Config dir override already registered");
    }
}

/// Directory holding the settings file, or `None` on platforms without a
/// config directory.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    let cli = CLI_OVERRIDE.get().cloned().flatten();
    let env = std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from);
    resolve(cli, env, dirs::config_dir())
}

/// Full path of `settings.toml`.
#[must_use]
pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_FILE_NAME))
}

fn resolve(
    cli: Option<PathBuf>,
    env: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    cli.or_else(|| env.filter(|p| !is_blank(p)))
        .or_else(|| platform.map(|base| base.join(APP_DIR_NAME)))
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Option<PathBuf> {
        Some(PathBuf::from(s))
    }

    #[test]
    fn cli_wins_over_environment() {
        let dir = resolve(p("/from/cli"), p("/from/env"), p("/home/u/.config"));
        assert_eq!(dir, p("/from/cli"));
    }

    #[test]
    fn environment_wins_over_platform() {
        let dir = resolve(None, p("/from/env"), p("/home/u/.config"));
        assert_eq!(dir, p("/from/env"));
    }

    #[test]
    fn blank_environment_is_ignored() {
        let dir = resolve(None, p(""), p("/home/u/.config"));
        assert_eq!(dir, p("/home/u/.config/CommonsLens"));
    }

    #[test]
    fn no_platform_dir_gives_none() {
        assert_eq!(resolve(None, None, None), None);
    }

    #[test]
    fn settings_file_is_inside_config_dir() {
        if let (Some(dir), Some(file)) = (config_dir(), settings_file()) {
            assert_eq!(file, dir.join(SETTINGS_FILE_NAME));
        }
    }
}
