//! Display labels for raw location text.

/// Label prepended to every formatted location.
pub const LOCATION_PREFIX: &str = "At ";

/// Turn raw location text from the log into a display label.
///
/// Strips a leading `menu ` token and a leading `menus/` prefix, drops a
/// trailing file extension, title-cases the remaining words and prefixes
/// [`LOCATION_PREFIX`]. Total over all inputs.
///
/// ```
/// use wfc_core::format_location;
///
/// assert_eq!(format_location("menus/main.toml"), "At Main");
/// assert_eq!(format_location("menu file areas"), "At File Areas");
/// ```
pub fn format_location(raw: &str) -> String {
    let text = raw.strip_prefix("menu ").unwrap_or(raw);
    let text = text.strip_prefix("menus/").unwrap_or(text);
    let text = strip_extension(text);

    let mut label = String::with_capacity(LOCATION_PREFIX.len() + text.len());
    label.push_str(LOCATION_PREFIX);
    label.push_str(&title_case(text));
    label
}

/// Drop `.ext` when the final path segment ends in one.
///
/// The extension must be non-empty ASCII alphanumerics and the dot must not
/// start the segment (`.profile` is a name, not an extension).
fn strip_extension(text: &str) -> &str {
    let segment_start = text.rfind('/').map_or(0, |i| i + 1);
    let Some(dot) = text.rfind('.') else {
        return text;
    };
    if dot <= segment_start {
        return text;
    }

    let ext = &text[dot + 1..];
    if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        &text[..dot]
    } else {
        text
    }
}

/// Uppercase the first character of every word.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_word_separator(c);
    }
    out
}

/// Whitespace and ASCII punctuation end a word; `_` does not.
fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_path() {
        assert_eq!(format_location("menus/main.toml"), "At Main");
        assert_eq!(format_location("menus/file_areas.toml"), "At File_areas");
    }

    #[test]
    fn menu_token() {
        assert_eq!(format_location("menu messages"), "At Messages");
        assert_eq!(format_location("menu menus/doors.toml"), "At Doors");
    }

    #[test]
    fn plain_label() {
        assert_eq!(format_location("lord"), "At Lord");
        assert_eq!(format_location("legend of the red dragon"), "At Legend Of The Red Dragon");
    }

    #[test]
    fn keeps_inner_capitals() {
        assert_eq!(format_location("BRE"), "At BRE");
        assert_eq!(format_location("tradeWars"), "At TradeWars");
    }

    #[test]
    fn extension_rules() {
        assert_eq!(format_location("scripts/oneliner.lua"), "At Scripts/Oneliner");
        assert_eq!(format_location(".hidden"), "At .Hidden");
        assert_eq!(format_location("dir.d/name"), "At Dir.D/Name");
        assert_eq!(format_location("v1.2 beta"), "At V1.2 Beta");
        assert_eq!(format_location("trailing."), "At Trailing.");
    }

    #[test]
    fn punctuation_starts_a_word() {
        assert_eq!(format_location("lord-x"), "At Lord-X");
        assert_eq!(format_location("doors/usurper"), "At Doors/Usurper");
        assert_eq!(format_location("file_areas"), "At File_areas");
    }

    #[test]
    fn empty_input() {
        assert_eq!(format_location(""), "At ");
    }

    #[test]
    fn formatting_is_idempotent_on_its_body() {
        let once = format_location("menus/main.toml");
        let body = once.strip_prefix(LOCATION_PREFIX).unwrap_or_default();
        assert_eq!(format_location(body), once);
    }
}
