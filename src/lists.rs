use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::VdfError;

static APP_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid app id pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    AppId,
    Invalid,
}

/// List entries split into usable app ids and everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// Result of appending ids to a list file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendOutcome {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
    pub created: bool,
}

/// Read list entries: one per line, trimmed, skipping blanks and `#` comments.
pub fn parse_list<R: BufRead>(reader: R) -> Result<Vec<String>, VdfError> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        items.push(trimmed.to_string());
    }
    Ok(items)
}

pub fn load_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, VdfError> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|e| VdfError::FileError {
        message: format!("Failed to open list file: {}", e),
        path: path_ref.to_string_lossy().to_string(),
        hint: Some("Check the path given to --allow, --deny or list".into()),
        code: Some(310),
    })?;

    let items = parse_list(BufReader::new(file))?;
    debug!(path = %path_ref.display(), entries = items.len(), "loaded list file");
    Ok(items)
}

/// An app id is a non-empty run of ASCII digits.
pub fn is_app_id(entry: &str) -> bool {
    APP_ID_RE.is_match(entry)
}

pub fn classify_entry(entry: &str) -> EntryKind {
    if is_app_id(entry) {
        EntryKind::AppId
    } else {
        EntryKind::Invalid
    }
}

/// Split list entries into app ids and invalid entries, keeping order.
///
/// Names are never resolved to ids here, even when they would match a known
/// game: lists only accept numeric ids.
pub fn classify_entries(items: &[String]) -> Classified {
    let mut out = Classified::default();
    for item in items {
        match classify_entry(item) {
            EntryKind::AppId => out.valid.push(item.clone()),
            EntryKind::Invalid => out.invalid.push(item.clone()),
        }
    }
    out
}

/// Narrow `all` with an allow list or a deny list.
///
/// A non-empty allow list keeps only the ids it contains. Otherwise a
/// non-empty deny list drops the ids it contains. Otherwise `all` is returned
/// unchanged. Order always follows `all`.
pub fn filter_ids(all: &[String], allow: Option<&[String]>, deny: Option<&[String]>) -> Vec<String> {
    if let Some(allow) = allow.filter(|a| !a.is_empty()) {
        let allow_set: HashSet<&str> = allow.iter().map(String::as_str).collect();
        return all
            .iter()
            .filter(|id| allow_set.contains(id.as_str()))
            .cloned()
            .collect();
    }

    if let Some(deny) = deny.filter(|d| !d.is_empty()) {
        let deny_set: HashSet<&str> = deny.iter().map(String::as_str).collect();
        return all
            .iter()
            .filter(|id| !deny_set.contains(id.as_str()))
            .cloned()
            .collect();
    }

    all.to_vec()
}

/// Append ids to a list file, creating it if needed.
///
/// Ids already present in the file (or repeated in `ids`) are skipped.
pub fn append_to_list<P: AsRef<Path>>(path: P, ids: &[String]) -> Result<AppendOutcome, VdfError> {
    let path_ref = path.as_ref();
    let created = !path_ref.exists();

    let mut seen: HashSet<String> = if created {
        HashSet::new()
    } else {
        classify_entries(&load_list(path_ref)?).valid.into_iter().collect()
    };

    let mut outcome = AppendOutcome {
        created,
        ..Default::default()
    };
    for id in ids {
        if seen.insert(id.clone()) {
            outcome.added.push(id.clone());
        } else {
            outcome.skipped.push(id.clone());
        }
    }

    if outcome.added.is_empty() {
        return Ok(outcome);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path_ref)
        .map_err(|e| VdfError::FileError {
            message: format!("Failed to open list file for writing: {}", e),
            path: path_ref.to_string_lossy().to_string(),
            hint: None,
            code: Some(311),
        })?;
    if missing_final_newline(&mut file)? {
        writeln!(file)?;
    }
    for id in &outcome.added {
        writeln!(file, "{}", id)?;
    }

    Ok(outcome)
}

/// True for a non-empty file whose last byte is not `\n`.
fn missing_final_newline(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_with_allow_list() {
        let all = ids(&["100", "200", "300", "400", "500"]);
        let allow = ids(&["100", "300"]);
        assert_eq!(filter_ids(&all, Some(allow.as_slice()), None), ids(&["100", "300"]));
    }

    #[test]
    fn test_filter_with_deny_list() {
        let all = ids(&["100", "200", "300", "400", "500"]);
        let deny = ids(&["200", "400"]);
        assert_eq!(filter_ids(&all, None, Some(deny.as_slice())), ids(&["100", "300", "500"]));
    }

    #[test]
    fn test_filter_allow_takes_precedence() {
        let all = ids(&["100", "200", "300", "400", "500"]);
        let allow = ids(&["100", "300"]);
        let deny = ids(&["100", "400"]);
        assert_eq!(filter_ids(&all, Some(allow.as_slice()), Some(deny.as_slice())), ids(&["100", "300"]));
    }

    #[test]
    fn test_filter_without_lists_is_identity() {
        let all = ids(&["100", "200", "300"]);
        assert_eq!(filter_ids(&all, None, None), all);
        assert_eq!(filter_ids(&all, Some(&[][..]), Some(&[][..])), all);
    }

    #[test]
    fn test_filter_keeps_order_of_all() {
        let all = ids(&["500", "100", "300"]);
        let allow = ids(&["100", "300", "500"]);
        assert_eq!(filter_ids(&all, Some(allow.as_slice()), None), ids(&["500", "100", "300"]));
    }

    #[test]
    fn test_filter_allow_with_unknown_ids() {
        let all = ids(&["100", "200"]);
        let allow = ids(&["999"]);
        assert!(filter_ids(&all, Some(allow.as_slice()), None).is_empty());
    }

    #[test]
    fn test_classify_entries() {
        assert_eq!(classify_entry("570"), EntryKind::AppId);
        assert_eq!(classify_entry("Dota 2"), EntryKind::Invalid);
        assert_eq!(classify_entry(""), EntryKind::Invalid);
        assert_eq!(classify_entry("57O"), EntryKind::Invalid);
        assert_eq!(classify_entry("٥٧٠"), EntryKind::Invalid); // non-ASCII digits

        let classified = classify_entries(&ids(&["570", "Counter-Strike 2", "730", "Dota 2"]));
        assert_eq!(classified.valid, ids(&["570", "730"]));
        assert_eq!(classified.invalid, ids(&["Counter-Strike 2", "Dota 2"]));
    }

    #[test]
    fn test_parse_list_skips_comments_and_blanks() {
        let content = "# This is a comment\nCounter-Strike 2\n570\n\n  # Another comment\n  Dota 2  \n730\n";
        let items = parse_list(content.as_bytes()).unwrap();
        assert_eq!(items, ids(&["Counter-Strike 2", "570", "Dota 2", "730"]));
    }

    #[test]
    fn test_load_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test-list.txt");
        fs::write(&path, "# games\n570\n730\n").unwrap();

        assert_eq!(load_list(&path).unwrap(), ids(&["570", "730"]));
    }

    #[test]
    fn test_load_list_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_list(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, VdfError::FileError { code: Some(310), .. }));
    }

    #[test]
    fn test_append_creates_then_dedupes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selected-games.txt");

        let first = append_to_list(&path, &ids(&["570", "730", "570"])).unwrap();
        assert!(first.created);
        assert_eq!(first.added, ids(&["570", "730"]));
        assert_eq!(first.skipped, ids(&["570"]));

        let second = append_to_list(&path, &ids(&["730", "440"])).unwrap();
        assert!(!second.created);
        assert_eq!(second.added, ids(&["440"]));
        assert_eq!(second.skipped, ids(&["730"]));

        assert_eq!(fs::read_to_string(&path).unwrap(), "570\n730\n440\n");
    }

    #[test]
    fn test_append_nothing_new_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "# mine\n570\n").unwrap();

        let outcome = append_to_list(&path, &ids(&["570"])).unwrap();
        assert!(outcome.added.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n570\n");
    }

    #[test]
    fn test_append_after_last_line_without_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hand-edited.txt");
        fs::write(&path, "570").unwrap();

        let outcome = append_to_list(&path, &ids(&["730"])).unwrap();
        assert_eq!(outcome.added, ids(&["730"]));
        assert_eq!(fs::read_to_string(&path).unwrap(), "570\n730\n");
        assert_eq!(load_list(&path).unwrap(), ids(&["570", "730"]));
    }

    #[test]
    fn test_append_to_empty_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let outcome = append_to_list(&path, &ids(&["570"])).unwrap();
        assert!(!outcome.created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "570\n");
    }
}
