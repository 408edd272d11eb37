use crate::domain::TagNamespace;
use crate::error::{PrStackError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".git-pr-stack.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = "git-pr-stack.toml";

fn default_target_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_prefix() -> String {
    "PR_BRANCH".to_string()
}

/// Runtime configuration for git-pr-stack.
///
/// `prefix` is used twice: commit messages declare a segment with a
/// `<prefix>=<branch>` line, and dry runs create tags named `<prefix>/<branch>`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Branch the stack sits on; paths are enumerated from HEAD down to it.
    #[serde(default = "default_target_branch")]
    pub target_branch: String,

    /// Remote that receives force-pushed branches.
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_branch: default_target_branch(),
            remote: default_remote(),
            prefix: default_prefix(),
        }
    }
}

impl Config {
    /// Namespace of every tag this tool owns
    pub fn tag_namespace(&self) -> TagNamespace {
        TagNamespace::new(self.prefix.clone())
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_branch.trim().is_empty() {
            return Err(PrStackError::config("target_branch must not be empty"));
        }
        if self.remote.trim().is_empty() {
            return Err(PrStackError::config("remote must not be empty"));
        }
        if self.prefix.trim().is_empty() {
            return Err(PrStackError::config("prefix must not be empty"));
        }
        if self.prefix.contains('=') || self.prefix.contains('/') {
            return Err(PrStackError::config(format!(
                "prefix '{}' must not contain '=' or '/'",
                self.prefix
            )));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.git-pr-stack.toml` in current directory
/// 3. `git-pr-stack.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
