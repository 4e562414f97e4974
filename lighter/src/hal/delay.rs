// Blockierende Delay-Implementierung für den Animations-Thread

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// `DelayNs` über `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        // 0 ms heißt "sofort", kein Yield
        if ms > 0 {
            thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}
