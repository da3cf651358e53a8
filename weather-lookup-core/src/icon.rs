/// Icon shown next to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    /// Mist, smoke, haze, dust, fog, sand, ash, squall, tornado and anything unknown.
    #[default]
    Atmosphere,
}

/// Provider condition category -> icon. Categories not listed use [`Icon::Atmosphere`].
const CONDITION_ICONS: &[(&str, Icon)] = &[
    ("Clear", Icon::Clear),
    ("Clouds", Icon::Clouds),
    ("Rain", Icon::Rain),
    ("Drizzle", Icon::Rain),
    ("Thunderstorm", Icon::Thunderstorm),
    ("Snow", Icon::Snow),
];

impl Icon {
    pub fn for_condition(condition: &str) -> Self {
        CONDITION_ICONS
            .iter()
            .find(|(category, _)| *category == condition)
            .map(|(_, icon)| *icon)
            .unwrap_or_default()
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Clear => "☀",
            Icon::Clouds => "☁",
            Icon::Rain => "🌧",
            Icon::Thunderstorm => "⛈",
            Icon::Snow => "❄",
            Icon::Atmosphere => "🌫",
        }
    }
}
