//! Translation engines the service can route to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A translation engine name accepted as `preferred_engine`
///
/// `Best` lets the service pick the engine it ranks highest for the language
/// pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Microsoft,
    Google,
    Amazon,
    Papago,
    Deepl,
    Yandex,
    #[default]
    Best,
}

impl Engine {
    pub const ALL: [Engine; 7] = [
        Engine::Microsoft,
        Engine::Google,
        Engine::Amazon,
        Engine::Papago,
        Engine::Deepl,
        Engine::Yandex,
        Engine::Best,
    ];

    /// Wire names, in the same order as [`Engine::ALL`]
    pub const NAMES: &'static [&'static str] = &[
        "microsoft",
        "google",
        "amazon",
        "papago",
        "deepl",
        "yandex",
        "best",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Microsoft => "microsoft",
            Engine::Google => "google",
            Engine::Amazon => "amazon",
            Engine::Papago => "papago",
            Engine::Deepl => "deepl",
            Engine::Yandex => "yandex",
            Engine::Best => "best",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::ALL
            .iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                format!(
                    "unknown engine '{}', expected one of: {}",
                    s,
                    Engine::NAMES.join(", ")
                )
            })
    }
}
