//! Pure Business Logic Functions
//!
//! Frame-Encoding für APA102-artige LED-Strips (ohne Hardware-Dependencies, testbar!)

use alloc::vec;
use alloc::vec::Vec;

use crate::types::{MAX_BRIGHTNESS, Pixel};

/// Start-Frame: 4 Null-Bytes
pub const HEADER_BYTES: usize = 4;

/// End-Frame/Latch: 12 Null-Bytes
pub const TRAILER_BYTES: usize = 12;

/// Bytes pro LED: `[0xE0 | brightness, blue, green, red]`
pub const BYTES_PER_LED: usize = 4;

/// Feste obere Bits des Helligkeits-Bytes
const BRIGHTNESS_MARKER: u8 = 0xE0;

/// Kodiert Pixel-Zustände in das Bus-Format eines ganzen Strips
///
/// Die Strip-Länge ist Konfiguration; alle LEDs bekommen denselben Wert.
///
/// # Beispiele
///
/// ```
/// # use lighter_core::{FrameEncoder, Pixel};
/// let encoder = FrameEncoder::new(2);
/// let frame = encoder.encode(Pixel::new(4, 0xFF, 0x22, 0x22));
/// assert_eq!(frame.len(), 4 + 2 * 4 + 12);
/// assert_eq!(&frame[4..8], &[0xE4, 0x22, 0x22, 0xFF]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEncoder {
    led_count: usize,
}

impl FrameEncoder {
    pub const fn new(led_count: usize) -> Self {
        Self { led_count }
    }

    /// Länge jedes Frames: `4 + N*4 + 12`
    pub const fn frame_len(&self) -> usize {
        HEADER_BYTES + self.led_count * BYTES_PER_LED + TRAILER_BYTES
    }

    /// Baut den kompletten Übertragungs-Buffer für `pixel`
    pub fn encode(&self, pixel: Pixel) -> Vec<u8> {
        let group = [
            BRIGHTNESS_MARKER | (pixel.brightness & MAX_BRIGHTNESS),
            pixel.color.b,
            pixel.color.g,
            pixel.color.r,
        ];

        // Header und Trailer bleiben 0
        let mut frame = vec![0u8; self.frame_len()];
        frame[HEADER_BYTES..HEADER_BYTES + self.led_count * BYTES_PER_LED]
            .chunks_exact_mut(BYTES_PER_LED)
            .for_each(|slot| slot.copy_from_slice(&group));
        frame
    }

    /// Liest die LED-Gruppe `index` aus einem Frame zurück
    ///
    /// `None` wenn der Index außerhalb des Strips liegt oder der Frame zu kurz ist.
    pub fn pixel_at(&self, frame: &[u8], index: usize) -> Option<Pixel> {
        if index >= self.led_count {
            return None;
        }
        let start = HEADER_BYTES + index * BYTES_PER_LED;
        match frame.get(start..start + BYTES_PER_LED)? {
            &[control, blue, green, red] => Some(Pixel::new(
                control & MAX_BRIGHTNESS,
                red,
                green,
                blue,
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRIP: FrameEncoder = FrameEncoder::new(144);

    #[test]
    fn test_frame_len_for_default_strip() {
        assert_eq!(STRIP.frame_len(), 4 + 144 * 4 + 12);
        assert_eq!(STRIP.encode(Pixel::off()).len(), 592);
        assert_eq!(STRIP.encode(Pixel::new(31, 1, 2, 3)).len(), 592);
    }

    #[test]
    fn test_header_and_trailer_are_zero() {
        let frame = STRIP.encode(Pixel::new(31, 0xFF, 0xFF, 0xFF));
        assert!(frame[..HEADER_BYTES].iter().all(|&b| b == 0));
        assert!(frame[frame.len() - TRAILER_BYTES..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_every_group_is_bgr_with_marker() {
        let frame = STRIP.encode(Pixel::new(4, 0xFF, 0x22, 0x11));
        for group in frame[HEADER_BYTES..frame.len() - TRAILER_BYTES].chunks_exact(4) {
            assert_eq!(group, &[0xE4, 0x11, 0x22, 0xFF]);
        }
    }

    #[test]
    fn test_brightness_marker_for_valid_range() {
        for b in 0..=MAX_BRIGHTNESS {
            let frame = STRIP.encode(Pixel::new(b, 0, 0, 0));
            assert_eq!(frame[HEADER_BYTES], 0xE0 | b);
        }
    }

    #[test]
    fn test_brightness_out_of_range_uses_low_5_bits() {
        for b in 32..=u8::MAX {
            let masked = STRIP.encode(Pixel::new(b & 0x1F, 9, 8, 7));
            assert_eq!(STRIP.encode(Pixel::new(b, 9, 8, 7)), masked);
        }
    }

    #[test]
    fn test_off_frame_only_has_markers() {
        let frame = STRIP.encode(Pixel::off());
        for group in frame[HEADER_BYTES..frame.len() - TRAILER_BYTES].chunks_exact(4) {
            assert_eq!(group, &[0xE0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_pixel_at_reads_back_groups() {
        let pixel = Pixel::new(4, 0xFF, 0x22, 0x22);
        let frame = STRIP.encode(pixel);
        assert_eq!(STRIP.pixel_at(&frame, 0), Some(pixel));
        assert_eq!(STRIP.pixel_at(&frame, 143), Some(pixel));
        assert_eq!(STRIP.pixel_at(&frame, 144), None);
    }

    #[test]
    fn test_pixel_at_short_frame() {
        assert_eq!(STRIP.pixel_at(&[0, 0, 0, 0, 0xE1], 0), None);
    }

    #[test]
    fn test_empty_strip() {
        let encoder = FrameEncoder::new(0);
        assert_eq!(encoder.encode(Pixel::new(31, 1, 1, 1)).len(), 16);
        assert_eq!(encoder.pixel_at(&[0; 16], 0), None);
    }
}
