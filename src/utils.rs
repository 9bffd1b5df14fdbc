use std::path::PathBuf;

/// Expand a leading `~/` to the home directory.
///
/// Other paths, and `~/` when no home directory is known, are returned as is.
pub fn expand_home(raw_path: &str) -> PathBuf {
    let path_str = raw_path.trim();

    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    PathBuf::from(path_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths_are_untouched() {
        assert_eq!(expand_home("/etc/localconfig.vdf"), PathBuf::from("/etc/localconfig.vdf"));
        assert_eq!(expand_home("relative/file.vdf"), PathBuf::from("relative/file.vdf"));
        assert_eq!(expand_home("~user/file"), PathBuf::from("~user/file"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/games/list.txt"), home.join("games/list.txt"));
        }
    }
}
