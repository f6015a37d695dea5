/// Japanese font families offered by the settings panel.
pub const JA_FONT_CATALOG: &[&str] = &[
    "Noto Sans JP",
    "Noto Serif JP",
    "Meiryo",
    "Meiryo UI",
    "Yu Gothic",
    "Yu Gothic UI",
    "Yu Mincho",
    "MS Gothic",
    "MS PGothic",
    "MS Mincho",
    "BIZ UDGothic",
    "BIZ UDMincho",
];

/// Latin font families offered by the settings panel.
pub const EN_FONT_CATALOG: &[&str] = &["Roboto", "Arial", "Times New Roman"];

/// Case-insensitive catalog lookup. Informational only; settings accept any family name.
pub fn is_cataloged_ja(name: &str) -> bool {
    contains_ignore_case(JA_FONT_CATALOG, name)
}

/// See [`is_cataloged_ja`].
pub fn is_cataloged_en(name: &str) -> bool {
    contains_ignore_case(EN_FONT_CATALOG, name)
}

fn contains_ignore_case(catalog: &[&str], name: &str) -> bool {
    let name = name.trim();
    catalog.iter().any(|f| f.eq_ignore_ascii_case(name))
}
