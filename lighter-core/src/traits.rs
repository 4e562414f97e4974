//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use thiserror::Error;

/// Einzelner Konfigurations-Schritt des SPI-Busses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusSetting {
    Mode,
    BitsPerWord,
    SpeedHz,
}

impl core::fmt::Display for BusSetting {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            BusSetting::Mode => "mode",
            BusSetting::BitsPerWord => "bits per word",
            BusSetting::SpeedHz => "max speed",
        };
        f.write_str(name)
    }
}

/// Fehler-Typ für LED-Operationen
///
/// Alle Varianten sind lokal und nicht fatal: sie werden geloggt und
/// an den Aufrufer zurückgegeben, der Prozess läuft weiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedError {
    #[error("error opening SPI device")]
    DeviceOpen,
    #[error("error setting SPI {0}")]
    Configuration(BusSetting),
    #[error("error sending SPI data")]
    Transfer,
}

/// Trait für den Frame-Transport zum LED-Strip
///
/// Nimmt einen fertig kodierten Frame entgegen und schiebt ihn raus.
/// `&self`, weil das Gerät pro Übertragung geöffnet und wieder geschlossen
/// wird; es gibt keinen Zustand zwischen zwei Aufrufen.
///
/// # Implementierungen
/// - **Production:** SpidevTransport (Linux `/dev/spidevX.Y`)
/// - **Off-Target:** StubTransport (loggt nur)
/// - **Testing:** MockTransport (in-memory Mock)
pub trait FrameTransport: Send + Sync {
    /// Überträgt einen kompletten Frame
    ///
    /// # Fehlerbehandlung
    /// Gibt die passende `LedError`-Variante zurück, kein Retry.
    fn transmit(&self, frame: &[u8]) -> Result<(), LedError>;
}

impl<T: FrameTransport + ?Sized> FrameTransport for alloc::boxed::Box<T> {
    fn transmit(&self, frame: &[u8]) -> Result<(), LedError> {
        (**self).transmit(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_led_error_messages() {
        assert_eq!(LedError::DeviceOpen.to_string(), "error opening SPI device");
        assert_eq!(
            LedError::Configuration(BusSetting::BitsPerWord).to_string(),
            "error setting SPI bits per word"
        );
        assert_eq!(LedError::Transfer.to_string(), "error sending SPI data");
    }
}
