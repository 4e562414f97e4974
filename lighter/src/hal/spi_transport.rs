// SPI Transport für Linux (spidev)
//
// Öffnet das Gerät pro Übertragung, konfiguriert Mode/Bits/Speed und
// schiebt den Frame mit einem einzigen Full-Duplex-Transfer raus.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;

use lighter_core::{BusSetting, FrameTransport, LedError};
use log::error;
use spidev::{SpiModeFlags, SpidevTransfer, spidevioctl};

use crate::config::BusConfig;

/// Real Hardware Frame Transport
///
/// Hält nur die Bus-Konfiguration. Das File-Handle lebt ausschließlich
/// innerhalb von `transmit()` und wird beim Verlassen des Scopes geschlossen,
/// auch wenn ein Konfigurations-Schritt fehlschlägt.
#[derive(Debug, Clone)]
pub struct SpidevTransport {
    config: BusConfig,
}

impl SpidevTransport {
    pub fn new(config: BusConfig) -> Self {
        Self { config }
    }

    fn open(&self) -> Result<File, LedError> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.config.device_path)
            .map_err(|e| {
                error!(
                    "error opening SPI device {}: {}",
                    self.config.device_path.display(),
                    e
                );
                LedError::DeviceOpen
            })
    }

    fn configure(&self, device: &File) -> Result<(), LedError> {
        let fd = device.as_raw_fd();

        let mode = SpiModeFlags::from_bits_truncate(u32::from(self.config.mode));
        spidevioctl::set_mode(fd, mode).map_err(|e| setting_failed(BusSetting::Mode, e))?;

        spidevioctl::set_bits_per_word(fd, self.config.bits_per_word)
            .map_err(|e| setting_failed(BusSetting::BitsPerWord, e))?;

        spidevioctl::set_max_speed_hz(fd, self.config.speed_hz)
            .map_err(|e| setting_failed(BusSetting::SpeedHz, e))?;

        Ok(())
    }
}

fn setting_failed(setting: BusSetting, e: io::Error) -> LedError {
    error!("error setting SPI {}: {}", setting, e);
    LedError::Configuration(setting)
}

impl FrameTransport for SpidevTransport {
    fn transmit(&self, frame: &[u8]) -> Result<(), LedError> {
        // SPI_IOC_MESSAGE liefert die Anzahl übertragener Bytes oder -1 mit errno.
        // `spidevioctl::transfer` verwirft die Anzahl; 0 kommt nur bei leerem Frame.
        if frame.is_empty() {
            error!("error sending SPI data: empty frame");
            return Err(LedError::Transfer);
        }

        let device = self.open()?;
        self.configure(&device)?;

        // RX-Buffer wird vom Kernel verlangt, Inhalt ist egal
        let mut rx = vec![0u8; frame.len()];
        let mut transfer = SpidevTransfer::read_write(frame, &mut rx);
        transfer.speed_hz = self.config.speed_hz;
        transfer.bits_per_word = self.config.bits_per_word;

        spidevioctl::transfer(device.as_raw_fd(), &mut transfer).map_err(|e| {
            error!("error sending SPI data: {}", e);
            LedError::Transfer
        })
    }
}
