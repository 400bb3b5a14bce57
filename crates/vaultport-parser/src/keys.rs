//! Reference-key derivation.
//!
//! A file in the vault can be linked to by its full relative path, by any
//! suffix of that path, or by its bare name. `derive_keys` produces that set,
//! most-specific first, so pattern matching can prefer the longest form.

/// Derive every string by which a file may be referenced from a note.
///
/// For `n` directory segments this produces exactly `n + 1` keys: one
/// `directories[i..] + base_name` join per starting index, then the bare
/// base name. Keys are literal strings; callers escape them before
/// embedding in patterns.
pub fn derive_keys(directories: &[String], base_name: &str) -> Vec<String> {
    let mut keys = Vec::with_capacity(directories.len() + 1);
    for i in 0..directories.len() {
        let mut parts: Vec<&str> = directories[i..].iter().map(String::as_str).collect();
        parts.push(base_name);
        keys.push(parts.join("/"));
    }
    keys.push(base_name.to_string());
    keys
}
