// Stub Transport für Entwicklung ohne LED-Strip
//
// Kein Device-I/O: der angeforderte Pixel wird nur geloggt und gemerkt.

use std::sync::{Mutex, PoisonError};

use lighter_core::{FrameEncoder, FrameTransport, LedError, Pixel};
use log::{info, warn};

/// Off-Target Frame Transport
///
/// Dekodiert die erste LED-Gruppe jedes Frames (alle LEDs sind gleich)
/// und gibt sie im Log aus.
#[derive(Debug)]
pub struct StubTransport {
    encoder: FrameEncoder,
    last_pixel: Mutex<Option<Pixel>>,
}

impl StubTransport {
    pub fn new(led_count: usize) -> Self {
        Self {
            encoder: FrameEncoder::new(led_count),
            last_pixel: Mutex::new(None),
        }
    }

    /// Zuletzt "gesendeter" Pixel
    pub fn last_pixel(&self) -> Option<Pixel> {
        *self.last_pixel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrameTransport for StubTransport {
    fn transmit(&self, frame: &[u8]) -> Result<(), LedError> {
        let Some(pixel) = self.encoder.pixel_at(frame, 0) else {
            warn!("Stub: frame of {} bytes carries no LED data", frame.len());
            return Ok(());
        };

        if pixel.is_dark() {
            info!("Stub: LEDs off");
        } else {
            info!(
                "Stub: LEDs on, brightness {} color #{:02x}{:02x}{:02x}",
                pixel.brightness, pixel.color.r, pixel.color.g, pixel.color.b
            );
        }

        *self.last_pixel.lock().unwrap_or_else(PoisonError::into_inner) = Some(pixel);
        Ok(())
    }
}
