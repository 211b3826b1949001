use crate::config::SiteConfig;
use crate::utils::error::{Result, SiteError};
use regex::Regex;
use std::path::Path;

impl SiteConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a config document after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content, |name| std::env::var(name).ok())?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replaces `${VAR}` with the looked-up value. Unknown variables are left
/// as written so validation can name the missing setting.
pub fn substitute_env_vars(
    content: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
        message: format!("placeholder pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}
