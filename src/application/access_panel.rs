//! Big red button access panel.
//!
//! The button is only live after three stages in order: the passcode is
//! entered on the keypad, the safety switch is flipped, then the arm
//! switch is flipped. Each stage shows green on its LED once met. Any
//! abort, wrong code, out-of-order switch or released switch drops back
//! to locked through a blocking lockout.

use crate::config::{
    ACK_STEPS, BLINK_STEP_MS, BLINK_TOGGLE_EVERY, LOCKOUT_MIN_STEPS, PASSCODE, PASSCODE_SLOTS,
};
use crate::drivers::{Key, KeySource, SerialConsole, StageLed, StatusLeds};
use crate::error::Error;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::serial::Write;
use heapless::Vec;
use ufmt::uwriteln;

/// Stage flags, each only set while the previous one holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stages {
    pub keypad_unlocked: bool,
    pub safety_released: bool,
    pub armed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PanelState {
    Locked,
    KeyMatched,
    SafetyReleased,
    Armed,
}

impl Stages {
    pub fn state(&self) -> PanelState {
        if self.armed {
            PanelState::Armed
        } else if self.safety_released {
            PanelState::SafetyReleased
        } else if self.keypad_unlocked {
            PanelState::KeyMatched
        } else {
            PanelState::Locked
        }
    }
}

/// Why the last lockout ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetCause {
    /// `*` pressed
    Abort,
    Mismatch,
    PassFull,
    SwitchReleased,
    /// A switch was flipped before the stage it depends on
    OutOfSequence,
}

/// Keys entered since the last `#` or reset.
#[derive(Default)]
pub struct Passcode {
    entered: Vec<u8, PASSCODE_SLOTS>,
}

impl Passcode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key; `Err` with the key when every slot is taken.
    pub fn push(&mut self, key: u8) -> Result<(), u8> {
        self.entered.push(key)
    }

    pub fn matches(&self, code: &[u8]) -> bool {
        self.entered.as_slice() == code
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.entered
    }

    pub fn clear(&mut self) {
        self.entered.clear();
    }
}

/// Two maintained switches, asserted when the input reads high.
pub struct Switches<S> {
    pub safety: S,
    pub arm: S,
}

impl<S: InputPin> Switches<S> {
    fn safety_on(&self) -> Result<bool, Error> {
        self.safety.is_high().map_err(|_| Error::Gpio)
    }

    fn arm_on(&self) -> Result<bool, Error> {
        self.arm.is_high().map_err(|_| Error::Gpio)
    }

    fn any_on(&self) -> Result<bool, Error> {
        Ok(self.safety_on()? || self.arm_on()?)
    }
}

pub struct AccessPanel<K, S, P, D, W> {
    keys: K,
    switches: Switches<S>,
    leds: StatusLeds<P>,
    delay: D,
    console: SerialConsole<W>,
    stages: Stages,
    passcode: Passcode,
    last_reset: Option<ResetCause>,
}

impl<K, S, P, D, W> AccessPanel<K, S, P, D, W>
where
    K: KeySource,
    S: InputPin,
    P: OutputPin,
    D: DelayMs<u16>,
    W: Write<u8>,
{
    pub fn new(
        keys: K,
        switches: Switches<S>,
        leds: StatusLeds<P>,
        delay: D,
        console: SerialConsole<W>,
    ) -> Self {
        Self {
            keys,
            switches,
            leds,
            delay,
            console,
            stages: Stages::default(),
            passcode: Passcode::new(),
            last_reset: None,
        }
    }

    pub fn stages(&self) -> Stages {
        self.stages
    }

    pub fn state(&self) -> PanelState {
        self.stages.state()
    }

    pub fn passcode(&self) -> &[u8] {
        self.passcode.as_bytes()
    }

    pub fn last_reset(&self) -> Option<ResetCause> {
        self.last_reset
    }

    pub fn leds(&self) -> &StatusLeds<P> {
        &self.leds
    }

    pub fn console_mut(&mut self) -> &mut SerialConsole<W> {
        &mut self.console
    }

    /// Run one pass of the main loop: switches, LEDs, then one key.
    pub fn step(&mut self) -> Result<(), Error> {
        self.check_safety_switch()?;
        self.check_arm_switch()?;
        self.refresh_leds()?;

        if let Some(key) = self.keys.read_key()? {
            self.console.echo(key).ok();
            self.handle_key(key)?;
        }
        Ok(())
    }

    fn check_safety_switch(&mut self) -> Result<(), Error> {
        let stages = self.stages;
        if self.switches.safety_on()? {
            if !stages.keypad_unlocked {
                self.lockout(ResetCause::OutOfSequence)?;
            } else if !stages.safety_released {
                self.stages.safety_released = true;
                self.acknowledge(StageLed::Safety)?;
            }
        } else if stages.safety_released {
            self.lockout(ResetCause::SwitchReleased)?;
        }
        Ok(())
    }

    fn check_arm_switch(&mut self) -> Result<(), Error> {
        let stages = self.stages;
        if self.switches.arm_on()? {
            if !(stages.keypad_unlocked && stages.safety_released) {
                self.lockout(ResetCause::OutOfSequence)?;
            } else if !stages.armed {
                self.stages.armed = true;
                self.acknowledge(StageLed::Armed)?;
            }
        } else if stages.armed {
            self.lockout(ResetCause::SwitchReleased)?;
        }
        Ok(())
    }

    fn refresh_leds(&mut self) -> Result<(), Error> {
        let Stages {
            keypad_unlocked,
            safety_released,
            armed,
        } = self.stages;
        self.leds.show(StageLed::Armed, keypad_unlocked && safety_released && armed)?;
        self.leds.show(StageLed::Safety, keypad_unlocked && safety_released)?;
        self.leds.show(StageLed::Unlock, keypad_unlocked)
    }

    fn handle_key(&mut self, key: Key) -> Result<(), Error> {
        match key {
            Key::Star => {
                self.console.write_str("\nReset\n").ok();
                self.lockout(ResetCause::Abort)
            }
            Key::Hash => self.check_passcode(),
            Key::Digit(_) => {
                if self.passcode.push(key.as_byte()).is_err() {
                    self.console.write_str("Pass Full").ok();
                    return self.lockout(ResetCause::PassFull);
                }
                Ok(())
            }
        }
    }

    fn check_passcode(&mut self) -> Result<(), Error> {
        if self.passcode.matches(PASSCODE) {
            self.console.write_str("Match!\n").ok();
            self.stages.keypad_unlocked = true;
            self.passcode.clear();
            return self.acknowledge(StageLed::Unlock);
        }

        let entered = core::str::from_utf8(self.passcode.as_bytes()).unwrap_or("");
        uwriteln!(&mut self.console, "Fail:{}\n\nReset", entered).ok();
        self.lockout(ResetCause::Mismatch)
    }

    /// Blink a stage LED green to confirm the transition into it.
    fn acknowledge(&mut self, which: StageLed) -> Result<(), Error> {
        self.leds.led_mut(which).off()?;
        for step in 0..=ACK_STEPS {
            self.delay.delay_ms(BLINK_STEP_MS);
            if step % BLINK_TOGGLE_EVERY == 0 {
                self.leds.led_mut(which).toggle_green()?;
            }
        }
        Ok(())
    }

    /// Drop every stage and the entered code, then block with the red
    /// LEDs flashing until both switches are off and the minimum
    /// cooldown has passed.
    fn lockout(&mut self, cause: ResetCause) -> Result<(), Error> {
        self.console.write_str("Resetting All").ok();
        self.stages = Stages::default();
        self.passcode.clear();
        self.last_reset = Some(cause);

        self.leds.all_off()?;
        let mut step: u16 = 0;
        while self.switches.any_on()? || step <= LOCKOUT_MIN_STEPS {
            self.delay.delay_ms(BLINK_STEP_MS);
            if step % BLINK_TOGGLE_EVERY == 0 {
                self.leds.toggle_reds()?;
            }
            step = step.saturating_add(1);
        }
        Ok(())
    }
}
