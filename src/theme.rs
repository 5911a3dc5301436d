//! Dashboard Color Palette
//!
//! Static mapping from semantic color roles to `#RRGGBB` strings.
//! 16 base roles; aliases resolve to one of them.

/// One base color role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeEntry {
    pub role: &'static str,
    pub hex: &'static str,
}

const fn entry(role: &'static str, hex: &'static str) -> ThemeEntry {
    ThemeEntry { role, hex }
}

/// The 16 base roles
pub const BASE_COLORS: [ThemeEntry; 16] = [
    entry("background", "#0F172A"),
    entry("surface", "#1E293B"),
    entry("surfaceRaised", "#273449"),
    entry("border", "#334155"),
    entry("textPrimary", "#F1F5F9"),
    entry("textSecondary", "#CBD5E1"),
    entry("textMuted", "#64748B"),
    entry("primaryAccent", "#3B82F6"),
    entry("secondaryAccent", "#8B5CF6"),
    entry("successState", "#22C55E"),
    entry("warningState", "#F59E0B"),
    entry("errorState", "#EF4444"),
    entry("infoState", "#06B6D4"),
    entry("highlight", "#FACC15"),
    entry("shadow", "#020617"),
    entry("overlay", "#111827"),
];

/// Semantic aliases as `(alias, base role)`
pub const ALIASES: [(&str, &str); 10] = [
    ("text", "textPrimary"),
    ("accent", "primaryAccent"),
    ("link", "primaryAccent"),
    ("success", "successState"),
    ("warning", "warningState"),
    ("danger", "errorState"),
    ("error", "errorState"),
    ("info", "infoState"),
    ("card", "surface"),
    ("divider", "border"),
];

fn base(role: &str) -> Option<&'static str> {
    BASE_COLORS.iter().find(|e| e.role == role).map(|e| e.hex)
}

/// Look up a base role or alias
pub fn color(name: &str) -> Option<&'static str> {
    base(name).or_else(|| {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .and_then(|(_, target)| base(target))
    })
}

/// Every name in the table (base roles, then aliases) with its color
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    BASE_COLORS
        .iter()
        .map(|e| (e.role, e.hex))
        .chain(
            ALIASES
                .iter()
                .filter_map(|(alias, target)| base(target).map(|hex| (*alias, hex))),
        )
}

/// Decode `#RRGGBB` into its channels
pub fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
