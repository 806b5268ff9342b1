//! Terminal output sanitization
//!
//! Captions come straight from the metadata table and are printed by the CLI.
//! They may contain ANSI escape sequences or line breaks; [`sanitize_for_display`]
//! turns them into a single safe line before printing.

/// Strips ANSI escape sequences and control characters, folding line breaks and
/// tabs into single spaces
///
/// # Examples
///
/// ```
/// use asset_search::utils::terminal::sanitize_for_display;
///
/// assert_eq!(sanitize_for_display("\x1b[31mRed\x1b[0m chair\nwith legs"), "Red chair with legs");
/// ```
pub fn sanitize_for_display(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // CSI sequence: ESC [ params final-letter
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&next_ch) = chars.peek() {
                    chars.next();
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }

        if ch == '\n' || ch == '\r' || ch == '\t' {
            if !result.ends_with(' ') {
                result.push(' ');
            }
            continue;
        }

        if ch.is_control() {
            continue;
        }

        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_codes() {
        assert_eq!(sanitize_for_display("\x1b[1m\x1b[31mBold Red\x1b[0m lamp"), "Bold Red lamp");
    }

    #[test]
    fn test_strips_cursor_movement() {
        assert_eq!(sanitize_for_display("\x1b[2J\x1b[HTable"), "Table");
    }

    #[test]
    fn test_folds_line_breaks() {
        assert_eq!(sanitize_for_display("A wooden\r\nchair\twith arms"), "A wooden chair with arms");
    }

    #[test]
    fn test_drops_bell_and_backspace() {
        assert_eq!(sanitize_for_display("Sofa\x07\x08"), "Sofa");
    }

    #[test]
    fn test_keeps_unicode() {
        assert_eq!(sanitize_for_display("椅子 🪑 chair"), "椅子 🪑 chair");
    }

    #[test]
    fn test_empty() {
        assert_eq!(sanitize_for_display(""), "");
    }
}
