//! Deterministic day/meal label canonicalization.
//!
//! The extraction model spells days and meals however the PDF did
//! ("LUNEDI'", "Mon", "Prima colazione", "spuntino di metà mattina").
//! These rules fold them onto the fixed Italian names the app renders.

/// Placeholder for a day entry with no label at all
pub const UNKNOWN_DAY: &str = "Sconosciuto";

/// Meal bucket for an entry with no label at all
pub const OTHER_MEAL: &str = "Altro";

/// Canonical meal order within a day
pub const MEAL_ORDER: [&str; 8] = [
    "Colazione",
    "Seconda Colazione",
    "Spuntino",
    "Pranzo",
    "Merenda",
    "Cena",
    "Spuntino Serale",
    "Nell'Arco Della Giornata",
];

const DAY_PREFIXES: [(&str, &str); 14] = [
    ("lun", "Lunedì"),
    ("mon", "Lunedì"),
    ("mar", "Martedì"),
    ("tue", "Martedì"),
    ("mer", "Mercoledì"),
    ("wed", "Mercoledì"),
    ("gio", "Giovedì"),
    ("thu", "Giovedì"),
    ("ven", "Venerdì"),
    ("fri", "Venerdì"),
    ("sab", "Sabato"),
    ("sat", "Sabato"),
    ("dom", "Domenica"),
    ("sun", "Domenica"),
];

/// Match the three-letter prefix of a day label (Italian or English).
pub fn match_day_prefix(label: &str) -> Option<&'static str> {
    let lower = label.trim().to_lowercase();
    let prefix: String = lower.chars().take(3).collect();
    if prefix.chars().count() < 3 {
        return None;
    }
    DAY_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, day)| *day)
}

/// Canonical day name. Idempotent: a canonical name maps to itself.
pub fn canonical_day(label: Option<&str>) -> String {
    let trimmed = match label.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return UNKNOWN_DAY.to_string(),
    };
    match match_day_prefix(trimmed) {
        Some(day) => day.to_string(),
        None => capitalize(trimmed),
    }
}

/// Match a meal label against the known categories.
///
/// Rule order matters: "seconda colazione" must not land in "Colazione",
/// "spuntino serale" must not land in "Spuntino".
pub fn match_meal(label: &str) -> Option<&'static str> {
    let raw = label.trim().to_lowercase();
    let has = |needle: &str| raw.contains(needle);

    if has("colazion") && !has("second") {
        return Some("Colazione");
    }
    if has("second") && has("colazion") {
        return Some("Seconda Colazione");
    }
    if has("spuntin") && has("sera") {
        return Some("Spuntino Serale");
    }
    if has("spuntin") {
        return Some("Spuntino");
    }
    if has("pranzo") {
        return Some("Pranzo");
    }
    if has("merenda") {
        return Some("Merenda");
    }
    if has("cena") {
        return Some("Cena");
    }
    None
}

/// Canonical meal name; unknown labels are title-cased, missing ones are "Altro".
pub fn canonical_meal(label: Option<&str>) -> String {
    let trimmed = match label.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return OTHER_MEAL.to_string(),
    };
    match match_meal(trimmed) {
        Some(meal) => meal.to_string(),
        None => title_case(trimmed),
    }
}

/// Upper-case the first character, lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    if let Some(first) = chars.next() {
        push_titled(&mut out, first);
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

/// Only the first char of an upper-case expansion stays upper ("ß" -> "Ss"),
/// so a second pass leaves the text unchanged.
fn push_titled(out: &mut String, c: char) {
    let mut upper = c.to_uppercase();
    if let Some(head) = upper.next() {
        out.push(head);
    }
    out.extend(upper.flat_map(char::to_lowercase));
}

/// Upper-case every letter that follows a non-letter, lower-case the others.
/// "nell'arco della giornata" -> "Nell'Arco Della Giornata".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                push_titled(&mut out, c);
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
