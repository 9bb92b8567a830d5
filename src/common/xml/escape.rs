use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automata are built only once, thread-safe
static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build XML text escaper")
});

static ATTRIBUTE_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\""])
        .expect("Failed to build XML attribute escaper")
});

/// Entities recognized as already escaped. Anything else after `&` is
/// treated as a literal ampersand.
const PREDEFINED_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Escape `&`, `<` and `>` in character data.
///
/// An ampersand that already starts a predefined or numeric character
/// reference is left alone, so feeding escaped text back in does not
/// produce `&amp;amp;`.
///
/// # Examples
///
/// ```
/// use cnxml2ptx::common::xml::escape_text;
/// assert_eq!(escape_text("a & b < c"), "a &amp; b &lt; c");
/// assert_eq!(escape_text("a &amp; b"), "a &amp; b");
/// assert_eq!(escape_text("AT&T"), "AT&amp;T");
/// ```
pub fn escape_text(s: &str) -> String {
    escape_with(&TEXT_ESCAPER, s)
}

/// Escape character data for use inside a double-quoted attribute value.
///
/// # Examples
///
/// ```
/// use cnxml2ptx::common::xml::escape_attribute;
/// assert_eq!(escape_attribute("say \"hi\" & go"), "say &quot;hi&quot; &amp; go");
/// ```
pub fn escape_attribute(s: &str) -> String {
    escape_with(&ATTRIBUTE_ESCAPER, s)
}

fn escape_with(automaton: &AhoCorasick, s: &str) -> String {
    let bytes = s.as_bytes();
    if memchr::memchr3(b'&', b'<', b'>', bytes).is_none() && memchr::memchr(b'"', bytes).is_none()
    {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + s.len() / 8 + 8);
    let mut last = 0;
    for m in automaton.find_iter(s) {
        out.push_str(&s[last..m.start()]);
        match &s[m.start()..m.end()] {
            "&" if starts_with_reference(&s[m.end()..]) => out.push('&'),
            "&" => out.push_str("&amp;"),
            "<" => out.push_str("&lt;"),
            ">" => out.push_str("&gt;"),
            "\"" => out.push_str("&quot;"),
            other => out.push_str(other),
        }
        last = m.end();
    }
    out.push_str(&s[last..]);
    out
}

/// Whether `rest` (the text following an `&`) begins with a complete
/// predefined or numeric character reference.
fn starts_with_reference(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    if let Some(dec) = body.strip_prefix('#') {
        return !dec.is_empty() && dec.bytes().all(|b| b.is_ascii_digit());
    }
    PREDEFINED_ENTITIES.contains(&body)
}

/// Resolve the body of an entity or character reference (without `&` and `;`).
///
/// Only the predefined XML entities and numeric references are known.
pub fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => return Some('&'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "quot" => return Some('"'),
        "apos" => return Some('\''),
        _ => {},
    }

    if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    None
}

/// Unescape XML references in raw attribute or text bytes.
///
/// Unknown or malformed references are left unchanged.
///
/// # Examples
///
/// ```
/// use cnxml2ptx::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&#956;"), "\u{3bc}");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// assert_eq!(unescape_xml("&amp"), "&amp");
/// ```
pub fn unescape_xml(s: &str) -> String {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';').and_then(|end| resolve_entity(&after[..end]).map(|c| (c, end))) {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            },
            None => {
                out.push('&');
                rest = after;
            },
        }
    }
    out.push_str(rest);
    out
}
