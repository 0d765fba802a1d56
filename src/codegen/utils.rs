//! Identifier case conversions used to derive entity and field names.
//!
//! The conversions are deliberately lossy: `to_snake_case(to_camel_case(s))`
//! does not give `s` back when the input used acronyms or delimiters other
//! than `_`. What does hold is that `to_camel_case` is idempotent.

fn is_delimiter(c: char) -> bool {
    matches!(c, '_' | '-' | ' ' | '.')
}

/// Convert a delimiter-separated or snake_case identifier to CamelCase.
///
/// The first letter is uppercased, and a run of delimiters between a letter
/// and a following letter is dropped with that following letter uppercased.
/// Delimiters before the first letter are kept, so `_secret` becomes
/// `_Secret` and stays recognisable as a suppressed field.
pub fn to_camel_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut seen_letter = false;
    let mut upper_next = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if is_delimiter(c) && seen_letter {
            let run_end = chars[i..]
                .iter()
                .position(|c| !is_delimiter(*c))
                .map_or(chars.len(), |offset| i + offset);
            if run_end < chars.len() && chars[run_end].is_ascii_alphabetic() {
                upper_next = true;
                i = run_end;
                continue;
            }
            out.extend(&chars[i..run_end]);
            i = run_end;
            continue;
        }

        if c.is_ascii_alphabetic() {
            if !seen_letter || upper_next {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            seen_letter = true;
            upper_next = false;
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

/// Convert a CamelCase identifier to snake_case.
///
/// A `_` is inserted before every uppercase letter that directly follows a
/// lowercase one, then the whole string is lowercased. Acronyms stay glued
/// together: `HTTPServer` becomes `httpserver`.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 2);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c);
    }

    out.to_ascii_lowercase()
}

/// Lowercased first character of `s`, or an empty string for empty input.
pub fn lower_first_letter(s: &str) -> String {
    s.chars().next().map(|c| c.to_ascii_lowercase().to_string()).unwrap_or_default()
}

/// `s` with only its first character lowercased (`UserProfile` -> `userProfile`).
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Escape a string for use inside a double-quoted Go string literal.
pub fn escape_go_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_camel_case("user_profile"), "UserProfile");
        assert_eq!(to_camel_case("nick_name"), "NickName");
        assert_eq!(to_camel_case("user-id"), "UserId");
        assert_eq!(to_camel_case("UserProfile"), "UserProfile");
        assert_eq!(to_snake_case("UserProfile"), "user_profile");
        assert_eq!(to_snake_case("NickName"), "nick_name");
    }

    #[test]
    fn test_leading_underscore_is_kept() {
        assert_eq!(to_camel_case("_secret_key"), "_SecretKey");
        assert_eq!(to_snake_case("_SecretKey"), "_secret_key");
    }

    #[test]
    fn test_delimiter_before_digit_is_kept() {
        assert_eq!(to_camel_case("addr_2"), "Addr_2");
        assert_eq!(to_camel_case("a__b"), "AB");
    }

    #[test]
    fn test_acronyms_are_not_split() {
        assert_eq!(to_snake_case("HTTPServer"), "httpserver");
        assert_eq!(to_snake_case("userID"), "user_id");
    }

    #[test]
    fn test_camel_case_is_idempotent() {
        for s in [
            "user_profile",
            "nick_name",
            "_hidden",
            "__double",
            "a__b",
            "addr_2",
            "a_1_b",
            "HTTP_server",
            "already Camel",
            "x",
        ] {
            let once = to_camel_case(s);
            assert_eq!(to_camel_case(&once), once, "input: {s}");
        }
    }

    #[test]
    fn test_round_trip_is_lossy() {
        assert_eq!(to_snake_case(&to_camel_case("user-id")), "user_id");
        assert_eq!(to_snake_case(&to_camel_case("HTTP_server")), "httpserver");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first_letter("UserProfile"), "u");
        assert_eq!(lower_first("UserProfile"), "userProfile");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_escape_go_string() {
        assert_eq!(escape_go_string("a\"b"), "a\\\"b");
        assert_eq!(escape_go_string("line\nbreak"), "line\\nbreak");
    }
}
