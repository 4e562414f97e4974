// Library-Root: Wiederverwendbare Logik und Module
// LED-Strip über Linux SPI: Driver, Transports und Flash-Animation

// Module
pub mod config;
pub mod driver;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von lighter-core
pub use lighter_core::{
    AnimationScript, AnimationStep, FrameEncoder, FrameTransport, LedCommand, LedError, Pixel,
    RGB8,
};

pub use config::LighterConfig;
pub use driver::LedDriver;
pub use tasks::{AnimationController, AnimationState};

use std::sync::Arc;

use log::info;

use crate::hal::{StdDelay, StubTransport};

/// Transport hinter dynamischem Dispatch, damit Hardware und Stub
/// zur Laufzeit gewählt werden können
pub type BoxedTransport = Box<dyn FrameTransport>;

/// Wählt den Transport für diesen Build
///
/// Mit dem `hardware` Feature auf Linux wird `/dev/spidevX.Y` genutzt,
/// sonst (oder mit `stub = true`) nur geloggt.
pub fn select_transport(config: &LighterConfig, stub: bool) -> BoxedTransport {
    #[cfg(all(target_os = "linux", feature = "hardware"))]
    {
        if !stub {
            info!(
                "Using SPI device {} ({} Hz, mode {})",
                config.bus.device_path.display(),
                config.bus.speed_hz,
                config.bus.mode
            );
            return Box::new(hal::SpidevTransport::new(config.bus.clone()));
        }
    }

    #[cfg(not(all(target_os = "linux", feature = "hardware")))]
    {
        if !stub {
            info!("Built without SPI support, falling back to stub transport");
        }
    }
    info!("Using stub transport ({} LEDs)", config.strip.led_count);
    Box::new(StubTransport::new(config.strip.led_count))
}

/// Baut Driver und Controller aus der Konfiguration
pub fn build_controller(
    config: &LighterConfig,
    transport: BoxedTransport,
) -> AnimationController<BoxedTransport, StdDelay> {
    let driver = Arc::new(LedDriver::new(config.strip.led_count, transport));
    AnimationController::new(driver, config.flash.clone(), StdDelay)
}
