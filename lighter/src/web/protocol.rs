// Query-Protokoll des HTTP-Aufrufers
// Übersetzt `b=<dezimal>&c=<RRGGBB>` in LedCommands
//
// Der HTTP-Server selbst lebt außerhalb dieser Crate; hier wird nur die
// Query ausgewertet, nachsichtig:
// unbekannte Keys werden übersprungen, Werte nur so weit gelesen wie sie passen.

use core::fmt::Write;

use lighter_core::{LedCommand, Pixel, RGB8};
use log::warn;

/// Welches Kommando aus einer Query entstehen soll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    On,
    Off,
    Flash,
}

/// Was aus einem einzelnen `key=value` Paar gelesen wurde
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedValue {
    /// `b=`: Helligkeit nach diesem Paar
    Brightness(u8),
    /// `c=`: Farbe nach diesem Paar
    Color(RGB8),
    /// Unbekannter Key
    Ignored,
}

/// Ein Query-Paar samt gelesenem Wert (für die Text-Antwort)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    pub parsed: ParsedValue,
}

/// Ausgewertete Query-Parameter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightQuery {
    /// `b=`: globale Helligkeit, `None` wenn nicht angegeben
    pub brightness: Option<u8>,
    /// `c=`: Farbe, schwarz wenn nicht angegeben
    pub color: RGB8,
    /// Alle `key=value` Paare in Reihenfolge
    pub params: Vec<QueryParam>,
}

impl LightQuery {
    /// Parst einen Query-String (ohne führendes `?`)
    ///
    /// Werte werden von vorne gelesen, soweit sie passen:
    /// `b=4x` ergibt 4, `c=FF22` ergibt (255, 34, 0).
    /// Ein Wert ohne lesbaren Anfang lässt das Feld wie es war.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();

        for param in query.split('&') {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };

            let value_read = match key {
                "b" => {
                    let previous = parsed.brightness.unwrap_or(0);
                    let brightness = scan_decimal_u8(value).unwrap_or_else(|| {
                        warn!("Query: invalid brightness {:?}", value);
                        previous
                    });
                    parsed.brightness = Some(brightness);
                    ParsedValue::Brightness(brightness)
                }
                "c" => {
                    if !scan_hex_color(value, &mut parsed.color) {
                        warn!("Query: incomplete color {:?}", value);
                    }
                    ParsedValue::Color(parsed.color)
                }
                _ => ParsedValue::Ignored,
            };

            parsed.params.push(QueryParam {
                key: key.to_owned(),
                value: value.to_owned(),
                parsed: value_read,
            });
        }

        parsed
    }

    /// Baut das passende LedCommand
    ///
    /// `On` ohne `b=` nutzt Helligkeit 0.
    /// `Flash` ohne `b=` nutzt die Skript-Helligkeit.
    pub fn into_command(self, kind: CommandKind) -> LedCommand {
        match kind {
            CommandKind::On => LedCommand::TurnOn(Pixel {
                brightness: self.brightness.unwrap_or(0),
                color: self.color,
            }),
            CommandKind::Off => LedCommand::TurnOff,
            CommandKind::Flash => LedCommand::FlashBang {
                color: self.color,
                brightness: self.brightness,
            },
        }
    }

    /// Text-Antwort wie sie der `/on` Endpoint zurückgibt
    pub fn describe(&self, raw_query: &str) -> String {
        let mut body = String::new();
        // fmt::Write auf String kann nicht fehlschlagen
        let _ = write!(body, "Query: {}\r\n", raw_query);
        for param in &self.params {
            let _ = write!(body, "  {} = {}\r\n", param.key, param.value);
            match param.parsed {
                ParsedValue::Brightness(brightness) => {
                    let _ = write!(body, "brightness: {}\r\n", brightness);
                }
                ParsedValue::Color(color) => {
                    let _ = write!(
                        body,
                        "red: {}\r\ngreen: {}\r\nblue: {}\r\n",
                        color.r, color.g, color.b
                    );
                }
                ParsedValue::Ignored => {}
            }
        }
        body
    }
}

/// Liest eine Dezimalzahl vom Anfang von `value`
///
/// Führende Leerzeichen und ein Vorzeichen sind erlaubt, gelesen wird bis zum
/// ersten Nicht-Ziffer-Zeichen. Der Wert läuft modulo 256 über (`300` → 44).
/// `None` wenn keine einzige Ziffer da ist.
fn scan_decimal_u8(value: &str) -> Option<u8> {
    let rest = value.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest.as_bytes()[..digits]
        .iter()
        .fold(0u8, |acc, d| acc.wrapping_mul(10).wrapping_add(d - b'0'));

    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

/// Liest einen Farbkanal aus bis zu 2 Hex-Ziffern, gibt den Rest zurück
fn scan_hex_channel(value: &str) -> Option<(u8, &str)> {
    let rest = value.trim_start();
    let digits = rest.bytes().take(2).take_while(u8::is_ascii_hexdigit).count();
    if digits == 0 {
        return None;
    }
    let (hex, rest) = rest.split_at(digits);
    u8::from_str_radix(hex, 16).ok().map(|channel| (channel, rest))
}

/// Liest `RRGGBB` (ohne `#`) Kanal für Kanal in `color`
///
/// Bricht beim ersten unlesbaren Kanal ab; die restlichen Kanäle bleiben
/// unverändert. `true` wenn alle drei gelesen wurden.
fn scan_hex_color(value: &str, color: &mut RGB8) -> bool {
    let mut rest = value;
    for channel in [&mut color.r, &mut color.g, &mut color.b] {
        let Some((parsed, tail)) = scan_hex_channel(rest) else {
            return false;
        };
        *channel = parsed;
        rest = tail;
    }
    true
}
