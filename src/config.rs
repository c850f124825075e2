// Configuration: who we are on Pixela and which graph to use by default.
// Values come from the process environment, optionally seeded from env
// files. Anything already set in the process wins over the files.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://pixe.la/v1/users";
pub const DEFAULT_GRAPH_ID: &str = "graph1";

pub const USERNAME_VAR: &str = "USERNAME";
pub const TOKEN_VAR: &str = "TOKEN";
pub const GRAPH_ID_VAR: &str = "GRAPH_ID";
pub const ENDPOINT_VAR: &str = "PIXELA_ENDPOINT";

#[derive(Clone)]
pub struct Config {
    pub username: String,
    pub token: String,
    pub graph_id: String,
    pub endpoint: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("graph_id", &self.graph_id)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let username = get(USERNAME_VAR);
        let token = get(TOKEN_VAR);
        let (username, token) = match (username, token) {
            (Some(u), Some(t)) => (u, t),
            (u, t) => {
                let missing: Vec<&str> = [(USERNAME_VAR, u.is_none()), (TOKEN_VAR, t.is_none())]
                    .into_iter()
                    .filter(|(_, absent)| *absent)
                    .map(|(k, _)| k)
                    .collect();
                return Err(Error::config(format!(
                    "missing required environment variables: {} (set them in .env or the environment)",
                    missing.join(", ")
                )));
            }
        };

        let endpoint = get(ENDPOINT_VAR)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            username,
            token,
            graph_id: get(GRAPH_ID_VAR).unwrap_or_else(|| DEFAULT_GRAPH_ID.to_string()),
            endpoint,
        })
    }

    /// The graph to act on: the override when given, else the configured one.
    pub fn resolve_graph(&self, graph_override: Option<&str>) -> Result<String> {
        let gid = graph_override.unwrap_or(&self.graph_id).trim();
        if gid.is_empty() {
            return Err(Error::config("graph id must not be empty (set GRAPH_ID or pass --graph <id>)"));
        }
        Ok(gid.to_string())
    }
}

/// Per-user env file, e.g. `~/.config/pixela/.env` on Linux.
pub fn user_env_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pixela").join(".env"))
}

/// Seed the process environment from env files.
///
/// An explicit path must exist. Without one, `./.env` and then the per-user
/// file are loaded when present. Variables already set are never replaced.
pub fn load_env_files(explicit: Option<&Path>) -> Result<()> {
    if let Some(path) = explicit {
        dotenvy::from_path(path)
            .map_err(|e| Error::config(format!("cannot load env file {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded env file");
        return Ok(());
    }

    let candidates = std::iter::once(PathBuf::from(".env")).chain(user_env_file());
    for path in candidates.filter(|p| p.is_file()) {
        dotenvy::from_path(&path)
            .map_err(|e| Error::config(format!("cannot load env file {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded env file");
    }
    Ok(())
}
