use crate::error::Error;
use embedded_hal::digital::v2::OutputPin;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Off,
    Green,
    Red,
}

/// Red/green LED pair driven by two active-high pins.
///
/// Pin levels are tracked here so the pair can be toggled without
/// reading the outputs back.
pub struct BicolorLed<P> {
    green: P,
    red: P,
    green_lit: bool,
    red_lit: bool,
}

impl<P: OutputPin> BicolorLed<P> {
    pub fn new(green: P, red: P) -> Self {
        Self {
            green,
            red,
            green_lit: false,
            red_lit: false,
        }
    }

    pub fn set(&mut self, color: Color) -> Result<(), Error> {
        self.set_green(color == Color::Green)?;
        self.set_red(color == Color::Red)
    }

    pub fn off(&mut self) -> Result<(), Error> {
        self.set(Color::Off)
    }

    pub fn toggle_green(&mut self) -> Result<(), Error> {
        self.set_green(!self.green_lit)
    }

    pub fn toggle_red(&mut self) -> Result<(), Error> {
        self.set_red(!self.red_lit)
    }

    pub fn is_green(&self) -> bool {
        self.green_lit
    }

    pub fn is_red(&self) -> bool {
        self.red_lit
    }

    pub fn release(self) -> (P, P) {
        (self.green, self.red)
    }

    fn set_green(&mut self, lit: bool) -> Result<(), Error> {
        drive(&mut self.green, lit)?;
        self.green_lit = lit;
        Ok(())
    }

    fn set_red(&mut self, lit: bool) -> Result<(), Error> {
        drive(&mut self.red, lit)?;
        self.red_lit = lit;
        Ok(())
    }
}

fn drive<P: OutputPin>(pin: &mut P, lit: bool) -> Result<(), Error> {
    if lit {
        pin.set_high().map_err(|_| Error::Gpio)
    } else {
        pin.set_low().map_err(|_| Error::Gpio)
    }
}

/// The access panel's three stage indicators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StageLed {
    Unlock = 0,
    Safety = 1,
    Armed = 2,
}

pub struct StatusLeds<P> {
    leds: [BicolorLed<P>; 3],
}

impl<P: OutputPin> StatusLeds<P> {
    pub fn new(unlock: BicolorLed<P>, safety: BicolorLed<P>, armed: BicolorLed<P>) -> Self {
        Self {
            leds: [unlock, safety, armed],
        }
    }

    pub fn led(&self, which: StageLed) -> &BicolorLed<P> {
        &self.leds[which as usize]
    }

    pub fn led_mut(&mut self, which: StageLed) -> &mut BicolorLed<P> {
        &mut self.leds[which as usize]
    }

    /// Green when `met`, red otherwise.
    pub fn show(&mut self, which: StageLed, met: bool) -> Result<(), Error> {
        let color = if met { Color::Green } else { Color::Red };
        self.led_mut(which).set(color)
    }

    pub fn all_off(&mut self) -> Result<(), Error> {
        for led in self.leds.iter_mut() {
            led.off()?;
        }
        Ok(())
    }

    pub fn toggle_reds(&mut self) -> Result<(), Error> {
        for led in self.leds.iter_mut() {
            led.toggle_red()?;
        }
        Ok(())
    }
}
