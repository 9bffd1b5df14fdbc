use indexmap::IndexMap;

/// Lookup tables built from `(app id, display name)` pairs.
///
/// Names are matched case-insensitively. On duplicate names the last pair
/// wins, without complaint.
#[derive(Debug, Clone, Default)]
pub struct NameMapping {
    by_name: IndexMap<String, String>,
    by_id: IndexMap<String, String>,
    names: IndexMap<String, String>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, app_id: &str, name: &str) {
        self.by_name.insert(name.to_lowercase(), app_id.to_string());
        self.by_id.insert(app_id.to_string(), app_id.to_string());
        self.names.insert(app_id.to_string(), name.to_string());
    }

    /// Resolve an id or a name to an app id. Ids are tried first.
    pub fn resolve(&self, entry: &str) -> Option<&str> {
        self.by_id
            .get(entry)
            .or_else(|| self.by_name.get(&entry.to_lowercase()))
            .map(String::as_str)
    }

    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Name as written in the manifest.
    pub fn display_name(&self, app_id: &str) -> Option<&str> {
        self.names.get(app_id).map(String::as_str)
    }

    /// Number of distinct app ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for NameMapping
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = NameMapping::new();
        for (app_id, name) in iter {
            mapping.insert(app_id.as_ref(), name.as_ref());
        }
        mapping
    }
}
