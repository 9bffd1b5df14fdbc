use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::VdfError;
use crate::config::LocalConfig;
use crate::parser;

mod mapping;

pub use mapping::NameMapping;

const APP_STATE_KEY: &str = "AppState";
const APP_ID_KEY: &str = "appid";
const NAME_KEY: &str = "name";

static MANIFEST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^appmanifest_[0-9]+\.acf$").expect("valid manifest pattern"));

static TOOL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Proton|Runtime").expect("valid tool pattern"));

/// An app from the config, joined with its manifest name when installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub app_id: String,
    pub name: String,
    pub launch_options: Option<String>,
    pub installed: bool,
}

/// Read `(appid, name)` from an app manifest stream.
///
/// Returns `Ok(None)` when the manifest has no `AppState` block or either
/// field is missing or empty.
pub fn read_manifest<R: BufRead>(reader: R) -> Result<Option<(String, String)>, VdfError> {
    let root = parser::parse_reader(reader)?;
    let Some(state) = root.child(APP_STATE_KEY) else {
        return Ok(None);
    };

    let app_id = state.child(APP_ID_KEY).and_then(|n| n.value()).unwrap_or_default();
    let name = state.child(NAME_KEY).and_then(|n| n.value()).unwrap_or_default();
    if app_id.is_empty() || name.is_empty() {
        return Ok(None);
    }
    Ok(Some((app_id.to_string(), name.to_string())))
}

pub fn is_manifest_file_name(name: &str) -> bool {
    MANIFEST_RE.is_match(name)
}

/// Collect `(appid, name)` pairs from the `steamapps` folder of each library.
///
/// Library directories are taken as given. A library without a readable
/// `steamapps` folder is skipped with a warning, and a manifest that can't be
/// read or lacks fields is skipped silently.
pub fn scan_manifests<P: AsRef<Path>>(libraries: &[P]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for library in libraries {
        let steamapps = library.as_ref().join("steamapps");
        let entries = match fs::read_dir(&steamapps) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %steamapps.display(), error = %e, "skipping library");
                continue;
            }
        };

        let mut files: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(is_manifest_file_name)
            })
            .collect();
        files.sort();

        for file in files {
            match File::open(&file).map_err(VdfError::from).and_then(|f| read_manifest(BufReader::new(f))) {
                Ok(Some(pair)) => pairs.push(pair),
                Ok(None) => debug!(path = %file.display(), "manifest without appid/name"),
                Err(e) => debug!(path = %file.display(), error = %e, "unreadable manifest"),
            }
        }
    }

    debug!(count = pairs.len(), "scanned app manifests");
    pairs
}

/// Runtime tools (Proton builds, Steam Linux Runtime) rather than games.
pub fn is_tool(name: &str) -> bool {
    TOOL_RE.is_match(name)
}

/// Join the config's apps with installed names.
///
/// Apps without a manifest keep their id as name and are not installed.
pub fn games(config: &LocalConfig, mapping: &NameMapping) -> Result<Vec<GameInfo>, VdfError> {
    Ok(config
        .apps()?
        .into_iter()
        .map(|app| {
            let display = mapping.display_name(&app.app_id);
            GameInfo {
                name: display.unwrap_or(&app.app_id).to_string(),
                installed: display.is_some(),
                app_id: app.app_id,
                launch_options: app.launch_options,
            }
        })
        .collect())
}

/// Case-insensitive match of `query` against name or app id.
pub fn matches_query(game: &GameInfo, query: &str) -> bool {
    let query = query.to_lowercase();
    game.name.to_lowercase().contains(&query) || game.app_id.contains(&query)
}
