//! GS1 character sets and the percent-escaping used to embed them in URIs.

const NULL: u8 = 0;

const fn char_set(chars: &[u8]) -> [bool; 128] {
    let mut table = [false; 128];
    let mut i = 0;
    while i < chars.len() {
        table[chars[i] as usize] = true;
        i += 1;
    }
    table
}

/// Characters permitted in GS1 Application Identifier values (GS1 General Specifications, figure 7.11-1).
static AI_CHARS: [bool; 128] = char_set(
    b"!\"%&'()*+,-./0123456789:;<=>?_\
      ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
);

/// Characters permitted in the AI for Component and Parts (figure 7.11-3).
static COMP_PART_CHARS: [bool; 128] = char_set(b"#-/0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ");

/// Returns `s` with `" # % & / < > ?` replaced by their `%XX` escapes and null bytes removed.
///
/// The result isn't validated: characters outside the GS1 sets pass through.
///
/// ```
/// assert_eq!(epc::escape_gs1("a/b%\0"), "a%2Fb%25");
/// ```
pub fn escape_gs1(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("%22"),
            '#' => out.push_str("%23"),
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '/' => out.push_str("%2F"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '?' => out.push_str("%3F"),
            '\0' => {}
            c => out.push(c),
        }
    }
    out
}

/// Reverses [escape_gs1]: replaces the eight `%XX` escapes with their characters.
///
/// Other `%` sequences are left alone, and removed nulls can't come back.
pub fn unescape_gs1(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(i) = rest.find('%') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];

        match tail.get(..3).and_then(unescaped_char) {
            Some(c) => {
                out.push(c);
                rest = &tail[3..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    out
}

fn unescaped_char(code: &str) -> Option<char> {
    match code {
        "%22" => Some('"'),
        "%23" => Some('#'),
        "%25" => Some('%'),
        "%26" => Some('&'),
        "%2F" => Some('/'),
        "%3C" => Some('<'),
        "%3E" => Some('>'),
        "%3F" => Some('?'),
        _ => None,
    }
}

/// True if `s` uses only the GS1 AI character set, optionally followed by nulls.
///
/// A null may only be followed by further nulls.
pub fn is_gs1_ai_encodable(s: &str) -> bool {
    is_encodable(s.as_bytes(), &AI_CHARS)
}

/// True if `s` uses only the GS1 Component and Parts character set,
/// optionally followed by nulls.
pub fn is_gs1_comp_part_encodable(s: &str) -> bool {
    is_encodable(s.as_bytes(), &COMP_PART_CHARS)
}

fn is_encodable(s: &[u8], table: &[bool; 128]) -> bool {
    let (text, padding) = match s.iter().position(|&b| b == NULL) {
        Some(i) => s.split_at(i),
        None => (s, &[][..]),
    };

    text.iter()
        .all(|&b| table.get(usize::from(b)).copied().unwrap_or(false))
        && padding.iter().all(|&b| b == NULL)
}
