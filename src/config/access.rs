use serde::Serialize;
use tracing::debug;

use super::*;

/// One app entry of the config's apps block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppEntry {
    pub app_id: String,
    pub launch_options: Option<String>,
}

impl LocalConfig {
    /// Get a leaf value by `/` path from the document root.
    ///
    /// Returns `None` if the path is missing or names an object.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.root.find(path).and_then(Node::value)
    }

    /// Check if a path exists (leaf or object).
    pub fn has(&self, path: &str) -> bool {
        self.root.find(path).is_some()
    }

    /// Get the child keys at a path, in file order.
    ///
    /// # Errors
    /// Returns `PathNotFound` if nothing lives at `path`.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, VdfError> {
        let node = self.root.find(path).ok_or_else(|| VdfError::PathNotFound {
            path: path.to_string(),
            hint: Some("Check that the path exists in your config file".into()),
            code: Some(304),
        })?;
        Ok(node.keys().into_iter().map(str::to_string).collect())
    }

    /// Set a leaf by `/` path from the document root, creating missing objects.
    ///
    /// # Errors
    /// Returns `InvalidPath` or `InvalidValue` when a key or the value holds
    /// `"`, `\n` or `\r`, which VDF text has no way to quote.
    pub fn set(&mut self, path: &str, value: &str) -> Result<(), VdfError> {
        check_path(path)?;
        check_value(value)?;
        self.root.upsert(path, value)
    }

    /// App ids listed in the apps block, in file order.
    ///
    /// # Errors
    /// Returns `PathNotFound` if the config has no apps block.
    pub fn app_ids(&self) -> Result<Vec<String>, VdfError> {
        self.get_keys(APPS_PATH).map_err(|_| VdfError::PathNotFound {
            path: APPS_PATH.to_string(),
            hint: Some("Is this a localconfig.vdf file?".into()),
            code: Some(304),
        })
    }

    pub fn launch_options(&self, app_id: &str) -> Option<&str> {
        self.get(&launch_options_path(app_id))
    }

    /// Every app with its current launch options.
    pub fn apps(&self) -> Result<Vec<AppEntry>, VdfError> {
        Ok(self
            .app_ids()?
            .into_iter()
            .map(|app_id| {
                let launch_options = self.launch_options(&app_id).map(str::to_string);
                AppEntry { app_id, launch_options }
            })
            .collect())
    }

    /// Set `LaunchOptions` for every given app id.
    ///
    /// Apps missing from the config get a new entry. Returns how many apps
    /// were updated.
    pub fn set_launch_options(&mut self, app_ids: &[String], args: &str) -> Result<usize, VdfError> {
        check_value(args)?;
        for app_id in app_ids {
            check_path(app_id)?;
        }

        for app_id in app_ids {
            self.root.upsert(&launch_options_path(app_id), args)?;
            debug!(app_id = %app_id, "set launch options");
        }
        Ok(app_ids.len())
    }
}

fn is_unwritable(c: char) -> bool {
    matches!(c, '"' | '\n' | '\r')
}

fn check_path(path: &str) -> Result<(), VdfError> {
    if path.contains(is_unwritable) {
        return Err(VdfError::InvalidPath {
            path: path.to_string(),
            message: "keys cannot contain quotes or line breaks".into(),
            hint: None,
            code: Some(305),
        });
    }
    Ok(())
}

fn check_value(value: &str) -> Result<(), VdfError> {
    if value.contains(is_unwritable) {
        return Err(VdfError::InvalidValue {
            value: value.to_string(),
            message: "values cannot contain quotes or line breaks".into(),
            hint: Some("Use single quotes inside launch options, e.g. FOO='a b' %command%".into()),
            code: Some(306),
        });
    }
    Ok(())
}
