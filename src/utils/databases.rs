/// Internal databases (`_users`, `_replicator`, `_global_changes`) start with an underscore.
pub fn is_system_database(name: &str) -> bool {
    name.starts_with('_')
}

/// Databases a whole-instance run acts on, in server order.
pub fn user_databases(names: &[String]) -> Vec<&str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| !name.is_empty() && !is_system_database(name))
        .collect()
}
