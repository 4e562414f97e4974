// Projekt-Konfiguration: Konstanten und Laufzeit-Konfiguration
//
// Die Konstanten sind die Defaults; `LighterConfig` kann sie aus einer
// JSON-Datei überschreiben (z.B. kurzer Test-Strip oder eigenes Skript).

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use lighter_core::AnimationScript;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

// ============================================================================
// LED Konfiguration
// ============================================================================

/// Anzahl der LEDs im Strip
pub const LED_COUNT: usize = 144;

// ============================================================================
// SPI Konfiguration
// ============================================================================

/// SPI Device-Pfad
/// Kann zur Build-Zeit über LIGHTER_SPI_DEVICE (oder .env) überschrieben werden
pub const SPI_DEVICE_PATH: &str = match option_env!("LIGHTER_SPI_DEVICE") {
    Some(path) => path,
    None => "/dev/spidev0.0",
};

/// SPI Mode (CPOL=0, CPHA=0)
pub const SPI_MODE: u8 = 0;

/// Bits pro Wort
pub const SPI_BITS_PER_WORD: u8 = 8;

/// Maximale SPI Taktfrequenz in Hz
pub const SPI_SPEED_HZ: u32 = 500_000;

// ============================================================================
// Laufzeit-Konfiguration
// ============================================================================

/// Fehler beim Laden der Konfigurations-Datei
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Strip-Geometrie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    pub led_count: usize,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            led_count: LED_COUNT,
        }
    }
}

/// SPI-Bus Parameter, fest für die Lebensdauer des Prozesses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    pub device_path: PathBuf,
    pub mode: u8,
    pub bits_per_word: u8,
    pub speed_hz: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from(SPI_DEVICE_PATH),
            mode: SPI_MODE,
            bits_per_word: SPI_BITS_PER_WORD,
            speed_hz: SPI_SPEED_HZ,
        }
    }
}

/// Eingebaute Skripte, per Name wählbar (JSON und `--script`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPreset {
    /// 250 ms, dann 100 ms pro Stufe
    FlashBang,
    /// 50 ms pro Stufe
    QuickFlash,
}

impl ScriptPreset {
    pub fn script(self) -> AnimationScript {
        match self {
            Self::FlashBang => AnimationScript::flash_bang(),
            Self::QuickFlash => AnimationScript::quick_flash(),
        }
    }
}

/// `"script"` im JSON: Preset-Name oder eigene Schritt-Liste
#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptSource {
    Preset(ScriptPreset),
    Steps(AnimationScript),
}

fn deserialize_script<'de, D>(deserializer: D) -> Result<AnimationScript, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ScriptSource::deserialize(deserializer)? {
        ScriptSource::Preset(preset) => preset.script(),
        ScriptSource::Steps(script) => script,
    })
}

/// Blitz-Animation: Skript plus optionale Start-Helligkeit
///
/// Ist `initial_brightness` gesetzt, ersetzt sie die Helligkeit des ersten
/// Skript-Schritts. Ein Wert vom Aufrufer hat wiederum Vorrang.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    #[serde(deserialize_with = "deserialize_script")]
    pub script: AnimationScript,
    pub initial_brightness: Option<u8>,
}

impl FlashConfig {
    /// Skript für einen konkreten Lauf
    pub fn script_for(&self, brightness: Option<u8>) -> AnimationScript {
        match brightness.or(self.initial_brightness) {
            Some(b) => self.script.with_initial_brightness(b),
            None => self.script.clone(),
        }
    }
}

/// Gesamt-Konfiguration
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LighterConfig {
    pub strip: StripConfig,
    pub bus: BusConfig,
    pub flash: FlashConfig,
}

impl LighterConfig {
    /// Lädt die Konfiguration aus einer JSON-Datei
    ///
    /// Fehlende Felder bekommen die Defaults von oben.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lighter_core::AnimationStep;

    #[test]
    fn test_defaults_match_constants() {
        let config = LighterConfig::default();
        assert_eq!(config.strip.led_count, 144);
        assert_eq!(config.bus.mode, 0);
        assert_eq!(config.bus.bits_per_word, 8);
        assert_eq!(config.bus.speed_hz, 500_000);
        assert_eq!(config.flash.script, AnimationScript::flash_bang());
        assert_eq!(config.flash.initial_brightness, None);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = LighterConfig::from_json("{}").unwrap();
        assert_eq!(config, LighterConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = LighterConfig::from_json(
            r#"{
                "strip": { "led_count": 8 },
                "bus": { "device_path": "/dev/spidev1.0", "speed_hz": 1000000 },
                "flash": {
                    "script": [
                        { "delay_ms": 0, "brightness": 20 },
                        { "delay_ms": 50, "brightness": 0 }
                    ],
                    "initial_brightness": 25
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.strip.led_count, 8);
        assert_eq!(config.bus.device_path, PathBuf::from("/dev/spidev1.0"));
        assert_eq!(config.bus.speed_hz, 1_000_000);
        assert_eq!(config.bus.bits_per_word, 8);
        assert_eq!(
            config.flash.script.steps(),
            &[AnimationStep::new(0, 20), AnimationStep::new(50, 0)]
        );
        assert_eq!(config.flash.initial_brightness, Some(25));
    }

    #[test]
    fn test_script_preset_by_name() {
        let config =
            LighterConfig::from_json(r#"{ "flash": { "script": "quick_flash" } }"#).unwrap();
        assert_eq!(config.flash.script, AnimationScript::quick_flash());

        let config =
            LighterConfig::from_json(r#"{ "flash": { "script": "flash_bang" } }"#).unwrap();
        assert_eq!(config.flash.script, AnimationScript::flash_bang());

        assert!(LighterConfig::from_json(r#"{ "flash": { "script": "strobe" } }"#).is_err());
    }

    #[test]
    fn test_script_preset_cli_names() {
        assert_eq!(
            ScriptPreset::from_str("quick-flash", false),
            Ok(ScriptPreset::QuickFlash)
        );
        assert_eq!(ScriptPreset::QuickFlash.script(), AnimationScript::quick_flash());
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(LighterConfig::from_json(r#"{ "strip": { "led_count": -1 } }"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = LighterConfig::load(Path::new("/nonexistent/lighter.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_script_for_precedence() {
        let flash = FlashConfig {
            script: AnimationScript::flash_bang(),
            initial_brightness: Some(20),
        };
        assert_eq!(flash.script_for(None).steps()[0].brightness, 20);
        assert_eq!(flash.script_for(Some(5)).steps()[0].brightness, 5);

        let plain = FlashConfig::default();
        assert_eq!(plain.script_for(None).steps()[0].brightness, 31);
    }
}
