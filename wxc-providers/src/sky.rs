use crate::provider::Provider;
use serde::{Deserialize, Serialize};

/// Normalized sky condition shared by every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkyCondition {
    Clear,
    PartlyCloudy,
    #[default]
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
}

const KMA_LABELS: &[(&str, SkyCondition)] = &[
    ("맑음", SkyCondition::Clear),
    ("구름 많음", SkyCondition::PartlyCloudy),
    ("구름많음", SkyCondition::PartlyCloudy),
    ("흐림", SkyCondition::Cloudy),
    ("비", SkyCondition::Rain),
    ("비/눈", SkyCondition::Rain),
    ("소나기", SkyCondition::Rain),
    ("구름많고 비", SkyCondition::Rain),
    ("흐리고 비", SkyCondition::Rain),
    ("구름많고 소나기", SkyCondition::Rain),
    ("흐리고 소나기", SkyCondition::Rain),
    ("눈", SkyCondition::Snow),
    ("구름많고 눈", SkyCondition::Snow),
    ("흐리고 눈", SkyCondition::Snow),
    ("뇌우", SkyCondition::Thunderstorm),
];

const OPEN_WEATHER_LABELS: &[(&str, SkyCondition)] = &[
    ("맑음", SkyCondition::Clear),
    ("구름 조금", SkyCondition::PartlyCloudy),
    ("구름 낱개", SkyCondition::PartlyCloudy),
    ("구름 많음", SkyCondition::Cloudy),
    ("흐림", SkyCondition::Cloudy),
    ("가벼운 비", SkyCondition::Rain),
    ("보통 비", SkyCondition::Rain),
    ("강한 비", SkyCondition::Rain),
    ("가벼운 눈", SkyCondition::Snow),
    ("눈", SkyCondition::Snow),
    ("뇌우", SkyCondition::Thunderstorm),
];

const ACCU_WEATHER_LABELS: &[(&str, SkyCondition)] = &[
    ("맑음", SkyCondition::Clear),
    ("대체로 맑음", SkyCondition::Clear),
    ("구름 조금", SkyCondition::PartlyCloudy),
    ("간헐적 구름", SkyCondition::PartlyCloudy),
    ("대체로 흐림", SkyCondition::Cloudy),
    ("흐림", SkyCondition::Cloudy),
    ("소나기", SkyCondition::Rain),
    ("비", SkyCondition::Rain),
    ("가벼운 비", SkyCondition::Rain),
    ("눈", SkyCondition::Snow),
    ("가벼운 눈", SkyCondition::Snow),
    ("뇌우", SkyCondition::Thunderstorm),
];

const DEEP_LEARNING_LABELS: &[(&str, SkyCondition)] = &[
    ("맑음", SkyCondition::Clear),
    ("구름 조금", SkyCondition::PartlyCloudy),
    ("구름 많음", SkyCondition::Cloudy),
    ("흐림", SkyCondition::Cloudy),
    ("비", SkyCondition::Rain),
    ("눈", SkyCondition::Snow),
];

impl SkyCondition {
    /// Look up a provider's source-locale label. Unknown labels are `Cloudy`.
    pub fn classify(provider: Provider, label: &str) -> Self {
        let table = match provider {
            Provider::Kma => KMA_LABELS,
            Provider::OpenWeather => OPEN_WEATHER_LABELS,
            Provider::AccuWeather => ACCU_WEATHER_LABELS,
            Provider::DeepLearning => DEEP_LEARNING_LABELS,
        };
        let label = label.trim();
        table
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, condition)| *condition)
            .unwrap_or_default()
    }

    /// Short icon name for text output
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::PartlyCloudy => "cloud_sun",
            Self::Cloudy => "cloud",
            Self::Rain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
        }
    }
}
