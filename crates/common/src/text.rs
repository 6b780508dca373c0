use sha2::{Digest, Sha256};

/// Canonical form for categorical values compared or grouped across issues.
pub fn normalize_key(input: &str) -> String {
    input.trim().to_lowercase()
}

pub fn normalize_opt(input: Option<&str>) -> Option<String> {
    input.map(normalize_key)
}

/// Case- and whitespace-insensitive equality.
pub fn same_key(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
