// LED Driver - ein synchroner Encode + Transmit Round-Trip pro Aufruf

use lighter_core::{FrameEncoder, FrameTransport, LedError, Pixel};
use log::error;

/// Schaltet den ganzen Strip auf einen Pixel-Wert
///
/// # Trait-basierte Abstraktion
/// Der generische Parameter `T: FrameTransport` ermöglicht:
/// - Real Hardware (SpidevTransport) im Production-Code
/// - StubTransport off-target
/// - Mock Implementation in Tests
///
/// Der Driver hat keinen veränderlichen Zustand und kann per `Arc`
/// zwischen Aufrufer und Animations-Thread geteilt werden.
#[derive(Debug)]
pub struct LedDriver<T> {
    encoder: FrameEncoder,
    transport: T,
}

impl<T: FrameTransport> LedDriver<T> {
    pub fn new(led_count: usize, transport: T) -> Self {
        Self {
            encoder: FrameEncoder::new(led_count),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Setzt alle LEDs auf `brightness` (0-31) und die RGB-Farbe
    ///
    /// Best-effort: Fehler werden geloggt und zurückgegeben, nie Panic.
    pub fn turn_on(&self, brightness: u8, red: u8, green: u8, blue: u8) -> Result<(), LedError> {
        self.turn_on_pixel(Pixel::new(brightness, red, green, blue))
    }

    pub fn turn_on_pixel(&self, pixel: Pixel) -> Result<(), LedError> {
        let frame = self.encoder.encode(pixel);
        self.transport.transmit(&frame).inspect_err(|e| {
            error!("Failed to write to LED strip: {}", e);
        })
    }

    /// Schaltet alle LEDs aus (gleicher Frame wie `turn_on(0, 0, 0, 0)`)
    pub fn turn_off(&self) -> Result<(), LedError> {
        self.turn_on_pixel(Pixel::off())
    }
}
