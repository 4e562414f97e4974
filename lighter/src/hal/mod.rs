// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter dem FrameTransport-Trait,
// um Testbarkeit und Off-Target-Entwicklung zu ermöglichen.

pub mod delay;
#[cfg(all(target_os = "linux", feature = "hardware"))]
pub mod spi_transport;
pub mod stub_transport;

pub use delay::StdDelay;
pub use lighter_core::{BusSetting, FrameTransport, LedError};
#[cfg(all(target_os = "linux", feature = "hardware"))]
pub use spi_transport::SpidevTransport;
pub use stub_transport::StubTransport;
