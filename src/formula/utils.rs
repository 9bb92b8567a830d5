// String assembly helpers for LaTeX output

use memchr::memrchr;

/// Append a fragment, separating it from a preceding control word.
///
/// `\mu` followed by `x` must not become the unknown command `\mux`.
#[inline]
pub fn push_latex(buffer: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if ends_with_control_word(buffer) && fragment.starts_with(|c: char| c.is_ascii_alphabetic()) {
        buffer.push(' ');
    }
    buffer.push_str(fragment);
}

/// Whether the buffer ends in `\` followed by one or more ASCII letters.
pub fn ends_with_control_word(buffer: &str) -> bool {
    let bytes = buffer.as_bytes();
    let Some(slash) = memrchr(b'\\', bytes) else {
        return false;
    };
    let word = &bytes[slash + 1..];
    !word.is_empty() && word.iter().all(u8::is_ascii_alphabetic)
}

/// Escape characters that are special inside `\text{}`.
pub fn escape_text_mode(text: &str, buffer: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                buffer.push('\\');
                buffer.push(ch);
            },
            '\\' => buffer.push_str("\\textbackslash{}"),
            _ => buffer.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_word_separation() {
        let mut buffer = String::from("\\mu");
        push_latex(&mut buffer, "x");
        assert_eq!(buffer, "\\mu x");

        let mut buffer = String::from("\\mu");
        push_latex(&mut buffer, "_{0}");
        assert_eq!(buffer, "\\mu_{0}");

        let mut buffer = String::from("\\\\");
        push_latex(&mut buffer, "x");
        assert_eq!(buffer, "\\\\x");
    }

    #[test]
    fn test_escape_text_mode() {
        let mut buffer = String::new();
        escape_text_mode("50% of {a}", &mut buffer);
        assert_eq!(buffer, "50\\% of \\{a\\}");
    }
}
