//! Connection profiles: load/save simple JSON mapping of profile name -> { url }
//! Stored under XDG config dir: $XDG_CONFIG_HOME/sentineltop/profiles.json (fallback ~/.config/sentineltop/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, io, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileEntry {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("sentineltop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sentineltop")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(io::Error::other)?;
    fs::write(path, data)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveProfile {
    /// Use the provided runtime url (not persisted yet)
    Direct(String),
    /// Loaded from existing profile entry
    Loaded(String),
    /// Should prompt user to select among profile names
    PromptSelect(Vec<String>),
    /// Should prompt user to create a new profile (name)
    PromptCreate(String),
    /// No profile could be resolved (e.g., missing arguments)
    None,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        match (self.url, self.profile_name) {
            // Only profile name given -> try load
            (None, Some(name)) => match pf.profiles.get(&name) {
                Some(entry) => ResolveProfile::Loaded(entry.url.clone()),
                None => ResolveProfile::PromptCreate(name),
            },
            // URL given -> direct (maybe later saved by caller)
            (Some(u), _) => ResolveProfile::Direct(u),
            // Nothing provided -> maybe prompt select if profiles exist
            (None, None) if pf.profiles.is_empty() => ResolveProfile::None,
            (None, None) => ResolveProfile::PromptSelect(pf.profiles.keys().cloned().collect()),
        }
    }
}

/// What persisting a direct URL under `name` should do.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveAction {
    Create,
    Unchanged,
    /// Existing entry differs; needs `--save` or confirmation.
    Overwrite,
}

pub fn save_action(pf: &ProfilesFile, name: &str, url: &str) -> SaveAction {
    match pf.profiles.get(name) {
        None => SaveAction::Create,
        Some(e) if e.url == url => SaveAction::Unchanged,
        Some(_) => SaveAction::Overwrite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(name: &str, url: &str) -> ProfilesFile {
        let mut pf = ProfilesFile::default();
        pf.profiles
            .insert(name.into(), ProfileEntry { url: url.into() });
        pf
    }

    #[test]
    fn resolution_rules() {
        let pf = file_with("prod", "ws://one/ws");
        let req = |url: Option<&str>, name: Option<&str>| ProfileRequest {
            url: url.map(Into::into),
            profile_name: name.map(Into::into),
        };
        assert_eq!(
            req(None, Some("prod")).resolve(&pf),
            ResolveProfile::Loaded("ws://one/ws".into())
        );
        assert_eq!(
            req(None, Some("dev")).resolve(&pf),
            ResolveProfile::PromptCreate("dev".into())
        );
        assert_eq!(
            req(Some("ws://x/ws"), Some("prod")).resolve(&pf),
            ResolveProfile::Direct("ws://x/ws".into())
        );
        assert_eq!(
            req(None, None).resolve(&pf),
            ResolveProfile::PromptSelect(vec!["prod".into()])
        );
        assert_eq!(
            req(None, None).resolve(&ProfilesFile::default()),
            ResolveProfile::None
        );
    }

    #[test]
    fn save_actions() {
        let pf = file_with("prod", "ws://one/ws");
        assert_eq!(save_action(&pf, "new", "ws://a"), SaveAction::Create);
        assert_eq!(save_action(&pf, "prod", "ws://one/ws"), SaveAction::Unchanged);
        assert_eq!(save_action(&pf, "prod", "ws://two/ws"), SaveAction::Overwrite);
    }
}
