use crate::StrError;

pub const DEFAULT_DELIMITER: char = ' ';

/// Byte-wise comparison that ignores whatever follows `prefix` in `s`: true
/// when every byte of `prefix` matches the start of `s`.
pub fn equals_weak(s: &str, prefix: &str) -> bool {
    s.as_bytes().starts_with(prefix.as_bytes())
}

/// Substring search. An empty `needle` is never found.
pub fn contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

/// The part of `path` after its last `/` or `\`, borrowed from `path`.
pub fn basename(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Leading token of `src` up to (not including) the first `delimiter`.
///
/// Fails instead of truncating when the token is longer than `capacity`
/// bytes.
pub fn get_token(src: &str, delimiter: char, capacity: usize) -> Result<&str, StrError> {
    let token = match src.find(delimiter) {
        Some(end) => &src[..end],
        None => src,
    };

    if token.len() > capacity {
        return Err(StrError::TokenTooLong {
            len: token.len(),
            capacity,
        });
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_equality_is_prefix_match() {
        assert!(equals_weak("hello", "hello"));
        assert!(equals_weak("hello world", "hello"));
        assert!(equals_weak("abc", ""));
        assert!(!equals_weak("hel", "hello"));
        assert!(!equals_weak("help", "hello"));
    }

    #[test]
    fn contains_finds_substrings() {
        assert!(contains("hello world", "wor"));
        assert!(contains("hello world", "hello world"));
        assert!(contains("aab", "ab"));
        assert!(!contains("hello", "world"));
    }

    #[test]
    fn contains_with_empty_inputs() {
        assert!(!contains("hello", ""));
        assert!(!contains("", "x"));
        assert!(!contains("", ""));
    }

    #[test]
    fn basename_after_last_separator() {
        assert_eq!(basename("a/b/c.png"), "c.png");
        assert_eq!(basename("c.png"), "c.png");
        assert_eq!(basename(r"assets\sprites\hero.png"), "hero.png");
        assert_eq!(basename(r"mixed/dir\leaf.png"), "leaf.png");
        assert_eq!(basename("/root.png"), "root.png");
        assert_eq!(basename("dir/"), "");
    }

    #[test]
    fn token_stops_at_delimiter() {
        assert_eq!(get_token("move 10 20", DEFAULT_DELIMITER, 16), Ok("move"));
        assert_eq!(get_token("a,b", ',', 16), Ok("a"));
        assert_eq!(get_token("whole", DEFAULT_DELIMITER, 5), Ok("whole"));
        assert_eq!(get_token(" lead", DEFAULT_DELIMITER, 0), Ok(""));
    }

    #[test]
    fn token_respects_capacity() {
        assert_eq!(
            get_token("toolong rest", DEFAULT_DELIMITER, 4),
            Err(StrError::TokenTooLong {
                len: 7,
                capacity: 4
            })
        );
    }
}
