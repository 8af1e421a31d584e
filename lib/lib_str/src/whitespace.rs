/// Collapses every run of spaces into a single space. Other whitespace is left
/// alone.
pub fn collapse_spaces(s: &mut String) {
    let mut prev_was_space = false;

    s.retain(|ch| {
        let is_space = ch == ' ';
        let keep = !(is_space && prev_was_space);
        prev_was_space = is_space;

        keep
    });
}

/// Removes leading and trailing whitespace in place: space, tab, newline,
/// vertical tab, form feed and carriage return.
pub fn trim_whitespace(s: &mut String) {
    let end = s.trim_end_matches(is_space).len();
    s.truncate(end);

    let start = s.len() - s.trim_start_matches(is_space).len();
    s.drain(..start);
}

fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
