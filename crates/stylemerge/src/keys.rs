//! Collision renaming.

/// Returns the first of `key1`, `key2`, `key3`, ... that `is_taken` rejects.
///
/// The result depends only on `current_key` and the taken set, so repeated
/// merges of the same input rename identically.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use stylemerge::next_new_key;
///
/// let taken: HashSet<&str> = ["name", "name1"].into_iter().collect();
/// assert_eq!(next_new_key("name", |k| taken.contains(k)), "name2");
/// ```
pub fn next_new_key<F>(current_key: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{current_key}{suffix}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
