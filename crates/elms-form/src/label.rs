//! Human-readable labels derived from camelCase field keys.

/// `workInformation` → `Work Information`, `eldLink` → `Eld Link`.
///
/// The first character is upper-cased and a space is inserted before every
/// later upper-case letter.
#[must_use]
pub fn humanize(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    let mut chars = key.chars();
    if let Some(first) = chars.next() {
        label.extend(first.to_uppercase());
    }
    for c in chars {
        if c.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(c);
    }
    label
}
