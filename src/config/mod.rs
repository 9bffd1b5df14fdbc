// Author: Dustin Pilgrim
// License: MIT

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::ast::Node;
use crate::export;
use crate::parser;
use crate::VdfError;

mod access;

pub use access::AppEntry;

/// Location of the per-app settings inside `localconfig.vdf`.
pub const APPS_PATH: &str = "UserLocalConfigStore/Software/Valve/Steam/apps";

/// Leaf holding an app's launch options, below `APPS_PATH/<app id>`.
pub const LAUNCH_OPTIONS_KEY: &str = "LaunchOptions";

/// A parsed per-user `localconfig.vdf`.
///
/// Holds the whole tree in memory. Edits go through [`LocalConfig::set`] and
/// [`LocalConfig::set_launch_options`], and [`LocalConfig::save`] rewrites
/// the file from the tree (comments in the loaded file are not kept).
pub struct LocalConfig {
    root: Node,
    source: Option<PathBuf>,
}

impl LocalConfig {
    /// Load and parse a config file.
    ///
    /// # Example
    /// ```no_run
    /// # use vdf_cfg::LocalConfig;
    /// # fn main() -> Result<(), vdf_cfg::VdfError> {
    /// let config = LocalConfig::from_file("localconfig.vdf")?;
    /// for id in config.app_ids()? {
    ///     println!("{}", id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VdfError> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref).map_err(|e| VdfError::FileError {
            message: format!("Failed to open file: {}", e),
            path: path_ref.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        let root = parser::parse_reader(BufReader::new(file))?;
        debug!(path = %path_ref.display(), entries = root.children().len(), "loaded config");

        Ok(Self {
            root,
            source: Some(path_ref.to_path_buf()),
        })
    }

    pub fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, VdfError> {
        Ok(Self {
            root: parser::parse_reader(reader)?,
            source: None,
        })
    }

    /// Parse a config from a string (no file I/O)
    pub fn from_str(content: &str) -> Result<Self, VdfError> {
        Ok(Self {
            root: parser::parse_str(content)?,
            source: None,
        })
    }

    pub fn from_root(root: Node) -> Self {
        Self { root, source: None }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// File this config was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), VdfError> {
        export::write_document(w, &self.root, 0)
    }

    pub fn to_vdf_string(&self) -> String {
        export::to_vdf_string(&self.root)
    }

    /// Rewrite `path` from the in-memory tree.
    ///
    /// The file is truncated and written in full; no backup is taken.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), VdfError> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|e| VdfError::FileError {
            message: format!("Failed to create file: {}", e),
            path: path_ref.to_string_lossy().to_string(),
            hint: Some("Check that the directory exists and is writable".into()),
            code: Some(302),
        })?;

        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;

        info!(path = %path_ref.display(), "wrote config");
        Ok(())
    }

    /// Save back to the file this config was loaded from.
    pub fn save_in_place(&self) -> Result<(), VdfError> {
        match &self.source {
            Some(path) => self.save(path),
            None => Err(VdfError::FileError {
                message: "Config was not loaded from a file".into(),
                path: String::new(),
                hint: Some("Use save() with an explicit path".into()),
                code: Some(303),
            }),
        }
    }
}

/// Path of the `LaunchOptions` leaf for one app.
pub fn launch_options_path(app_id: &str) -> String {
    format!("{}/{}/{}", APPS_PATH, app_id, LAUNCH_OPTIONS_KEY)
}

#[cfg(test)]
mod tests;
