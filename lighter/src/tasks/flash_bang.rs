// Flash-Bang Animation - spielt ein Helligkeits-Skript im Hintergrund ab
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use embedded_hal::delay::DelayNs;
use lighter_core::{AnimationScript, FrameTransport, LedCommand, LedError, RGB8};
use log::{info, warn};
use thiserror::Error;

use crate::config::FlashConfig;
use crate::driver::LedDriver;
use crate::hal::StdDelay;

/// Zustand des Controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Animating,
}

/// Fehler beim Ausführen eines LedCommand
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Led(#[from] LedError),
    #[error("cannot start animation thread")]
    Spawn(#[source] io::Error),
}

/// Animation Logic - Testbare Business Logic ohne Thread
///
/// Iteriert das Skript in Reihenfolge: erst warten, dann einschalten.
/// Ein fehlgeschlagener Schritt bricht das Skript nicht ab.
///
/// # Parameter
/// - `driver`: LED Driver (Hardware, Stub oder Mock)
/// - `script`: abzuspielende Schritte
/// - `color`: Farbe für alle Schritte
/// - `delay`: Delay-Quelle (StdDelay oder Test-Delay)
pub fn run_script<T: FrameTransport, D: DelayNs>(
    driver: &LedDriver<T>,
    script: &AnimationScript,
    color: RGB8,
    mut delay: D,
) {
    for (index, step) in script.steps().iter().enumerate() {
        delay.delay_ms(step.delay_ms);

        if driver
            .turn_on(step.brightness, color.r, color.g, color.b)
            .is_err()
        {
            warn!("Flash step {} failed, continuing", index);
        }
    }
}

/// Besitzt die (höchstens eine) laufende Hintergrund-Animation
///
/// Ein neuer `flash_bang()` wartet, bis die vorherige Animation komplett
/// durchgelaufen ist (join, kein Abbruch), und startet erst dann.
pub struct AnimationController<T, D = StdDelay> {
    driver: Arc<LedDriver<T>>,
    flash: FlashConfig,
    delay: D,
    current: Option<JoinHandle<()>>,
}

impl<T, D> AnimationController<T, D> {
    /// `Animating` solange der letzte Animations-Thread noch läuft
    pub fn state(&self) -> AnimationState {
        match &self.current {
            Some(handle) if !handle.is_finished() => AnimationState::Animating,
            _ => AnimationState::Idle,
        }
    }

    /// Blockiert bis die laufende Animation (falls vorhanden) fertig ist
    pub fn wait(&mut self) {
        if let Some(handle) = self.current.take() {
            if handle.join().is_err() {
                warn!("Flash animation thread panicked");
            }
        }
    }
}

impl<T, D> AnimationController<T, D>
where
    T: FrameTransport + 'static,
    D: DelayNs + Clone + Send + 'static,
{
    pub fn new(driver: Arc<LedDriver<T>>, flash: FlashConfig, delay: D) -> Self {
        Self {
            driver,
            flash,
            delay,
            current: None,
        }
    }

    pub fn driver(&self) -> &Arc<LedDriver<T>> {
        &self.driver
    }

    /// Startet die Blitz-Animation in `color`
    ///
    /// `brightness` überschreibt die Start-Helligkeit des Skripts.
    /// Kehrt sofort zurück, sobald der Thread läuft; blockiert nur solange
    /// eine vorherige Animation noch nicht fertig ist.
    pub fn flash_bang(&mut self, color: RGB8, brightness: Option<u8>) -> io::Result<()> {
        if self.state() == AnimationState::Animating {
            info!("Flash: waiting for previous animation");
        }
        self.wait();

        let script = self.flash.script_for(brightness);
        let driver = Arc::clone(&self.driver);
        let delay = self.delay.clone();

        info!(
            "Flash: starting {} steps ({} ms) in #{:02x}{:02x}{:02x}",
            script.len(),
            script.total_delay_ms(),
            color.r,
            color.g,
            color.b
        );

        let handle = thread::Builder::new()
            .name("flash-bang".into())
            .spawn(move || run_script(&driver, &script, color, delay))?;
        self.current = Some(handle);
        Ok(())
    }

    /// Führt ein Kommando vom Aufrufer aus
    ///
    /// `TurnOn`/`TurnOff` gehen direkt an den Driver, `FlashBang` an die Animation.
    pub fn execute(&mut self, command: LedCommand) -> Result<(), CommandError> {
        match command {
            LedCommand::TurnOn(pixel) => self.driver.turn_on_pixel(pixel)?,
            LedCommand::TurnOff => self.driver.turn_off()?,
            LedCommand::FlashBang { color, brightness } => self
                .flash_bang(color, brightness)
                .map_err(CommandError::Spawn)?,
        }
        Ok(())
    }
}

impl<T, D> Drop for AnimationController<T, D> {
    fn drop(&mut self) {
        self.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::StubTransport;
    use lighter_core::{AnimationStep, Pixel};

    /// Delay ohne Wartezeit
    #[derive(Clone, Copy)]
    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn controller(script: AnimationScript) -> AnimationController<StubTransport, NoDelay> {
        let driver = Arc::new(LedDriver::new(2, StubTransport::new(2)));
        let flash = FlashConfig {
            script,
            initial_brightness: None,
        };
        AnimationController::new(driver, flash, NoDelay)
    }

    #[test]
    fn test_new_controller_is_idle() {
        let controller = controller(AnimationScript::flash_bang());
        assert_eq!(controller.state(), AnimationState::Idle);
    }

    #[test]
    fn test_flash_ends_on_last_step() {
        let mut controller = controller(AnimationScript::flash_bang());
        let color = RGB8 { r: 0xFF, g: 0x22, b: 0x22 };

        controller.flash_bang(color, None).unwrap();
        controller.wait();

        assert_eq!(controller.state(), AnimationState::Idle);
        assert_eq!(
            controller.driver().transport().last_pixel(),
            Some(Pixel::new(0, 0xFF, 0x22, 0x22))
        );
    }

    #[test]
    fn test_execute_turn_on_and_off() {
        let mut controller = controller(AnimationScript::flash_bang());

        controller
            .execute(LedCommand::TurnOn(Pixel::new(4, 1, 2, 3)))
            .unwrap();
        assert_eq!(
            controller.driver().transport().last_pixel(),
            Some(Pixel::new(4, 1, 2, 3))
        );

        controller.execute(LedCommand::TurnOff).unwrap();
        assert_eq!(
            controller.driver().transport().last_pixel(),
            Some(Pixel::off())
        );
    }

    #[test]
    fn test_execute_flash_with_brightness() {
        let script = AnimationScript::new(vec![AnimationStep::new(0, 31)]);
        let mut controller = controller(script);

        controller
            .execute(LedCommand::FlashBang {
                color: RGB8 { r: 9, g: 9, b: 9 },
                brightness: Some(3),
            })
            .unwrap();
        controller.wait();

        assert_eq!(
            controller.driver().transport().last_pixel(),
            Some(Pixel::new(3, 9, 9, 9))
        );
    }

    #[test]
    fn test_empty_script_is_harmless() {
        let mut controller = controller(AnimationScript::new(Vec::new()));
        controller.flash_bang(RGB8::default(), None).unwrap();
        controller.wait();
        assert_eq!(controller.driver().transport().last_pixel(), None);
    }
}
