//! Latin letter classification.

/// Is `c` a Latin letter?
///
/// Classification is by Unicode letter case category intersected with the
/// Latin script blocks (basic, supplement, extended).
pub fn is_letter(c: char) -> bool {
    if !(c.is_lowercase() || c.is_uppercase()) {
        return false;
    }

    matches!(c,
        'A'..='Z' | 'a'..='z' |
        '\u{00C0}'..='\u{00D6}' |  // Latin-1 supplement letters
        '\u{00D8}'..='\u{00F6}' |
        '\u{00F8}'..='\u{00FF}' |
        '\u{0100}'..='\u{024F}' |  // Latin Extended-A and -B
        '\u{1E00}'..='\u{1EFF}'    // Latin Extended Additional
    )
}

/// Lower the case of the first character only.
pub fn uncap(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
