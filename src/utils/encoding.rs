//! Text decoding helpers for Doxygen search data

/// Decode a Doxygen search id
///
/// Doxygen lower-cases symbol names and replaces every character that is
/// not alphanumeric with `_` followed by two lowercase hex digits
/// (`halfedge_5fhandle` → `halfedge_handle`, `_3c_20` → `< `). Escaped
/// bytes are collected and decoded as UTF-8, so multi-byte characters
/// survive. Malformed escapes are kept verbatim.
pub fn decode_search_id(id: &str) -> String {
    let bytes = id.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'_' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Lower-case `text` one character at a time
///
/// Unlike `str::to_lowercase` this ignores word context (a final capital
/// sigma folds to `σ` like any other), so a folded prefix is always a
/// prefix of the folded whole.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode the HTML entities Doxygen emits in display names
///
/// Handles the named entities `&lt; &gt; &amp; &quot; &apos;` and numeric
/// `&#NN;` / `&#xNN;` references. Unknown entities are left as-is.
pub fn decode_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail.find(';').and_then(|semi| {
            let name = &tail[1..semi];
            decode_entity(name).map(|ch| (ch, semi + 1))
        });

        match decoded {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
