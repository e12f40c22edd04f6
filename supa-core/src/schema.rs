//! Schema list handling.

/// The schema that always leads the generated type list.
pub const PRIMARY_SCHEMA: &str = "public";

/// Merge schema lists into a single ordered list.
///
/// Lists are concatenated in order. Empty names and duplicates are dropped
/// (the first occurrence wins), and [`PRIMARY_SCHEMA`] is moved or inserted
/// at the front, so the result is never empty.
pub fn merge_schemas<I, L, S>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = L>,
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merged: Vec<String> = Vec::new();
    for list in lists {
        for schema in list {
            let schema = schema.as_ref();
            if !schema.is_empty() && !merged.iter().any(|s| s == schema) {
                merged.push(schema.to_string());
            }
        }
    }

    match merged.iter().position(|s| s == PRIMARY_SCHEMA) {
        Some(0) => {}
        Some(idx) => {
            let primary = merged.remove(idx);
            merged.insert(0, primary);
        }
        None => merged.insert(0, PRIMARY_SCHEMA.to_string()),
    }

    merged
}
