/// Identifier translation
///
/// Converts mixed-case type and field names (`UserComment`, `FullName`, `ID`)
/// into the store's underscore naming (`user_comment`, `full_name`, `id`).

/// Translate a mixed-case identifier into `snake_case`.
///
/// A separator goes in front of an upper-case letter when it follows a
/// lower-case letter or digit, or when it starts a capitalised word
/// (`[A-Z][a-z]+`) preceded by any character. The result is lower-cased.
/// Already translated input comes back unchanged.
#[must_use]
pub fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let after_lower_or_digit = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let starts_word = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);

            if after_lower_or_digit || starts_word {
                out.push('_');
            }
        }
        out.push(c);
    }

    out.to_lowercase()
}

/// Quote an identifier for use in SQL text (`order` -> `"order"`).
/// Embedded double quotes are doubled.
#[must_use]
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
