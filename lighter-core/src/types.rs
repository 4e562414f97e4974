//! Core Types für LED-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use alloc::vec::Vec;
use rgb::RGB8;

/// Höchster Wert der globalen 5-Bit-Helligkeit
pub const MAX_BRIGHTNESS: u8 = 0x1F;

/// Zustand eines einzelnen LED-Slots
///
/// `brightness` ist die globale Helligkeit (0-31) und unabhängig von der
/// Farbstärke der einzelnen Kanäle. Größere Werte werden beim Encoding
/// auf die unteren 5 Bits maskiert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    pub brightness: u8,
    pub color: RGB8,
}

impl Pixel {
    /// Erstellt einen Pixel aus Helligkeit und RGB-Kanälen
    pub const fn new(brightness: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            brightness,
            color: RGB8 {
                r: red,
                g: green,
                b: blue,
            },
        }
    }

    /// Komplett dunkler Pixel (entspricht "aus")
    pub const fn off() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Helligkeit so wie sie auf dem Bus landet
    pub const fn wire_brightness(&self) -> u8 {
        self.brightness & MAX_BRIGHTNESS
    }

    /// `true` wenn der Pixel nichts leuchten lässt
    pub const fn is_dark(&self) -> bool {
        self.wire_brightness() == 0 || (self.color.r == 0 && self.color.g == 0 && self.color.b == 0)
    }
}

/// Ein Schritt eines Animations-Skripts
///
/// Erst wird `delay_ms` gewartet, dann wird der Strip mit `brightness`
/// (und der Farbe des Skript-Laufs) eingeschaltet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationStep {
    pub delay_ms: u32,
    pub brightness: u8,
}

impl AnimationStep {
    pub const fn new(delay_ms: u32, brightness: u8) -> Self {
        Self {
            delay_ms,
            brightness,
        }
    }
}

/// Geordnete Folge von Animations-Schritten
///
/// Der erste Schritt hat per Konvention `delay_ms == 0` (sofort anwenden).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AnimationScript {
    steps: Vec<AnimationStep>,
}

impl AnimationScript {
    pub fn new(steps: Vec<AnimationStep>) -> Self {
        Self { steps }
    }

    /// Standard-Blitz: voll an, nach 250 ms auf 8, dann alle 100 ms eine Stufe dunkler
    pub fn flash_bang() -> Self {
        Self::decay(250, 100)
    }

    /// Schnelle Variante: gleiche Stufen, 50 ms pro Schritt
    pub fn quick_flash() -> Self {
        Self::decay(50, 50)
    }

    /// Baut `[(0,31), (first,8), (step,7), ... (step,0)]`
    fn decay(first_delay_ms: u32, step_delay_ms: u32) -> Self {
        let mut steps = Vec::with_capacity(10);
        steps.push(AnimationStep::new(0, MAX_BRIGHTNESS));
        steps.push(AnimationStep::new(first_delay_ms, 8));
        steps.extend((0..8u8).rev().map(|b| AnimationStep::new(step_delay_ms, b)));
        Self { steps }
    }

    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Summe aller Wartezeiten in Millisekunden
    pub fn total_delay_ms(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.delay_ms)).sum()
    }

    /// Kopie des Skripts, bei der der erste Schritt `brightness` nutzt
    ///
    /// Leere Skripte bleiben leer.
    pub fn with_initial_brightness(&self, brightness: u8) -> Self {
        let mut steps = self.steps.clone();
        if let Some(first) = steps.first_mut() {
            first.brightness = brightness;
        }
        Self { steps }
    }
}

impl Default for AnimationScript {
    fn default() -> Self {
        Self::flash_bang()
    }
}

/// LED Command vom Aufrufer (z.B. HTTP-Handler)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    /// Ganzen Strip statisch auf einen Pixel-Wert setzen
    TurnOn(Pixel),
    /// Strip ausschalten
    TurnOff,
    /// Blitz-Animation im Hintergrund abspielen
    FlashBang {
        color: RGB8,
        /// Überschreibt die Helligkeit des ersten Skript-Schritts
        brightness: Option<u8>,
    },
}
