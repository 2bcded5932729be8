//! Text helpers for merchant names and labels

/// Capitalize the first character of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Decode the HTML entities that appear in merchant names.
///
/// Handles the named entities the mock data actually uses plus numeric
/// character references. Unrecognized entities are left untouched.
pub fn decode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find(';') {
            Some(end) => {
                let entity = &tail[1..end];
                match decode_entity(entity) {
                    Some(decoded) => out.push_str(&decoded),
                    None => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(tail);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<String> {
    match entity {
        "amp" => Some("&".to_string()),
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "quot" => Some("\"".to_string()),
        "apos" => Some("'".to_string()),
        "nbsp" => Some(" ".to_string()),
        _ => {
            let code = entity.strip_prefix("#x").map(|h| u32::from_str_radix(h, 16))
                .or_else(|| entity.strip_prefix('#').map(|d| d.parse::<u32>()))?;
            code.ok().and_then(char::from_u32).map(String::from)
        }
    }
}

/// Spoken-match candidates for a merchant name.
///
/// Returns the entity-decoded, lowercased name, and when the name contains
/// " & " also the variant with " and " substituted, since the grammar side
/// uses either interchangeably.
pub fn merchant_candidates(name: &str) -> Vec<String> {
    let text = decode_entities(name).to_lowercase();
    let mut list = vec![text.clone()];
    if text.contains(" & ") {
        list.push(text.replace(" & ", " and "));
    }
    list
}
