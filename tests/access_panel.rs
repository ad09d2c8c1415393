mod common;

use common::{Capture, Clock, Line, Typist};
use keypad_firmware::application::{AccessPanel, PanelState, ResetCause, Switches};
use keypad_firmware::drivers::{BicolorLed, SerialConsole, StageLed, StatusLeds};

/// 61 blink steps of 50 ms
const LOCKOUT_MS: u32 = 3050;
/// 11 blink steps of 50 ms
const ACK_MS: u32 = 550;

struct Rig {
    panel: AccessPanel<Typist, Line, Line, Clock, Capture>,
    keys: Typist,
    safety: Line,
    arm: Line,
    /// (green, red) per LED
    leds: [(Line, Line); 3],
    clock: Clock,
    out: Capture,
}

impl Rig {
    fn new() -> Self {
        let keys = Typist::default();
        let safety = Line::default();
        let arm = Line::default();
        let clock = Clock::default();
        let leds = [(); 3].map(|_| (clock.traced_line(), clock.traced_line()));
        let out = Capture::default();

        let bicolor = |(green, red): &(Line, Line)| BicolorLed::new(green.clone(), red.clone());
        let panel = AccessPanel::new(
            keys.clone(),
            Switches {
                safety: safety.clone(),
                arm: arm.clone(),
            },
            StatusLeds::new(bicolor(&leds[0]), bicolor(&leds[1]), bicolor(&leds[2])),
            clock.clone(),
            SerialConsole::new(out.clone()),
        );

        Self {
            panel,
            keys,
            safety,
            arm,
            leds,
            clock,
            out,
        }
    }

    /// Type `text` and run one loop pass per key.
    fn enter(&mut self, text: &str) {
        self.keys.type_in(text);
        while self.keys.remaining() > 0 {
            self.panel.step().unwrap();
        }
    }

    fn step(&mut self) {
        self.panel.step().unwrap();
    }

    fn unlocked() -> Self {
        let mut rig = Self::new();
        rig.enter("1234#");
        assert_eq!(rig.panel.state(), PanelState::KeyMatched);
        rig
    }

    fn armed() -> Self {
        let mut rig = Self::unlocked();
        rig.safety.set(true);
        rig.step();
        assert_eq!(rig.panel.state(), PanelState::SafetyReleased);
        rig.arm.set(true);
        rig.step();
        assert_eq!(rig.panel.state(), PanelState::Armed);
        rig
    }

    fn led_lines(&self, which: StageLed) -> (bool, bool) {
        let (green, red) = &self.leds[which as usize];
        (green.is_set(), red.is_set())
    }

    /// Edges of the (green, red) pins of one LED.
    fn led_edges(&self, which: StageLed) -> (Vec<(u32, bool)>, Vec<(u32, bool)>) {
        let (green, red) = &self.leds[which as usize];
        (green.edges(), red.edges())
    }
}

#[test]
fn correct_code_unlocks_the_keypad_stage() {
    let mut rig = Rig::new();

    rig.enter("1234#");

    assert_eq!(rig.panel.state(), PanelState::KeyMatched);
    assert!(rig.panel.passcode().is_empty());
    assert_eq!(rig.panel.last_reset(), None);
    assert_eq!(rig.out.text(), "1234#Match!\n");
    assert_eq!(rig.clock.now(), ACK_MS);
}

#[test]
fn acknowledgment_leaves_the_unlock_led_green() {
    let mut rig = Rig::new();

    rig.enter("1234#");
    assert!(rig.panel.leds().led(StageLed::Unlock).is_green());

    rig.step();
    assert_eq!(rig.led_lines(StageLed::Unlock), (true, false));
    assert_eq!(rig.led_lines(StageLed::Safety), (false, true));
    assert_eq!(rig.led_lines(StageLed::Armed), (false, true));
}

#[test]
fn acknowledgment_blinks_green_on_steps_zero_five_and_ten() {
    let mut rig = Rig::new();

    rig.enter("1234#");

    let (green, red) = rig.led_edges(StageLed::Unlock);
    // red while locked, cleared as the blink starts
    assert_eq!(red, vec![(0, true), (0, false)]);
    assert_eq!(green, vec![(50, true), (300, false), (550, true)]);

    // the other stages only showed red
    let (green, red) = rig.led_edges(StageLed::Safety);
    assert!(green.is_empty());
    assert_eq!(red, vec![(0, true)]);
}

#[test]
fn lockout_blinks_every_red_on_every_fifth_step() {
    let mut rig = Rig::new();

    rig.enter("9#");
    assert_eq!(rig.clock.now(), LOCKOUT_MS);

    // toggles after steps 0, 5, .., 60
    let mut expected = vec![(0, true), (0, false)];
    expected.extend((0..=12u32).map(|k| (250 * k + 50, k % 2 == 0)));

    for which in [StageLed::Unlock, StageLed::Safety, StageLed::Armed] {
        let (green, red) = rig.led_edges(which);
        assert!(green.is_empty());
        assert_eq!(red, expected);
    }
}

#[test]
fn wrong_code_locks_out() {
    for code in ["1235#", "9999#"] {
        let mut rig = Rig::new();

        rig.enter(code);

        assert_eq!(rig.panel.state(), PanelState::Locked);
        assert_eq!(rig.panel.last_reset(), Some(ResetCause::Mismatch));
        assert!(rig.panel.passcode().is_empty());
        let expected = format!("{code}Fail:{}\n\nReset\nResetting All", &code[..4]);
        assert_eq!(rig.out.text(), expected);
        assert_eq!(rig.clock.now(), LOCKOUT_MS);
    }
}

#[test]
fn code_with_extra_digits_is_rejected() {
    let mut rig = Rig::new();

    rig.enter("12345#");

    assert_eq!(rig.panel.state(), PanelState::Locked);
    assert_eq!(rig.panel.last_reset(), Some(ResetCause::Mismatch));
}

#[test]
fn empty_code_is_rejected() {
    let mut rig = Rig::new();

    rig.enter("#");

    assert_eq!(rig.panel.last_reset(), Some(ResetCause::Mismatch));
}

#[test]
fn eleventh_digit_overflows_the_buffer() {
    let mut rig = Rig::new();

    rig.enter("1234567890");
    assert_eq!(rig.panel.passcode(), b"1234567890");
    assert_eq!(rig.panel.last_reset(), None);

    rig.enter("1");

    assert_eq!(rig.panel.state(), PanelState::Locked);
    assert_eq!(rig.panel.last_reset(), Some(ResetCause::PassFull));
    assert!(rig.panel.passcode().is_empty());
    assert!(rig.out.text().ends_with("12345678901Pass FullResetting All"));
}

#[test]
fn code_can_be_entered_after_a_lockout() {
    let mut rig = Rig::new();

    rig.enter("77#");
    rig.enter("1234#");

    assert_eq!(rig.panel.state(), PanelState::KeyMatched);
}

#[test]
fn star_aborts_every_stage() {
    let mut rig = Rig::unlocked();
    rig.enter("12");

    rig.enter("*");

    assert_eq!(rig.panel.state(), PanelState::Locked);
    assert_eq!(rig.panel.last_reset(), Some(ResetCause::Abort));
    assert!(rig.panel.passcode().is_empty());
    assert!(rig.out.text().ends_with("*\nReset\nResetting All"));
}

#[test]
fn switches_advance_through_the_stages() {
    let mut rig = Rig::unlocked();
    let start = rig.clock.now();

    rig.safety.set(true);
    rig.step();
    assert_eq!(rig.panel.state(), PanelState::SafetyReleased);

    rig.arm.set(true);
    rig.step();
    assert_eq!(rig.panel.state(), PanelState::Armed);
    assert_eq!(rig.clock.now() - start, 2 * ACK_MS);

    // held switches keep the panel armed without further blinking
    rig.step();
    rig.step();
    assert_eq!(rig.panel.state(), PanelState::Armed);
    assert_eq!(rig.clock.now() - start, 2 * ACK_MS);
    assert_eq!(rig.led_lines(StageLed::Unlock), (true, false));
    assert_eq!(rig.led_lines(StageLed::Safety), (true, false));
    assert_eq!(rig.led_lines(StageLed::Armed), (true, false));
}

#[test]
fn releasing_safety_while_armed_resets_everything() {
    let mut rig = Rig::armed();
    let start = rig.clock.now();

    rig.safety.set(false);
    rig.clock.schedule(1000, &rig.arm, false);
    rig.step();

    let stages = rig.panel.stages();
    assert!(!stages.keypad_unlocked && !stages.safety_released && !stages.armed);
    assert_eq!(rig.panel.state(), PanelState::Locked);
    assert_eq!(rig.panel.last_reset(), Some(ResetCause::SwitchReleased));
    assert_eq!(rig.clock.now() - start, LOCKOUT_MS);
}

#[test]
fn releasing_arm_while_armed_resets_everything() {
    let mut rig = Rig::armed();

    rig.arm.set(false);
    rig.safety.set(false);
    rig.step();

    assert_eq!(rig.panel.state(), PanelState::Locked);
    assert_eq!(rig.panel.last_reset(), Some(ResetCause::SwitchReleased));
}

#[test]
fn safety_before_code_locks_out_until_released() {
    let mut rig = Rig::new();

    rig.safety.set(true);
    rig.clock.schedule(5000, &rig.safety, false);
    rig.step();

    assert_eq!(rig.panel.last_reset(), Some(ResetCause::OutOfSequence));
    assert_eq!(rig.panel.state(), PanelState::Locked);
    // held past the minimum cooldown
    assert_eq!(rig.clock.now(), 5000);
}

#[test]
fn arm_before_safety_locks_out() {
    let mut rig = Rig::unlocked();

    rig.arm.set(true);
    rig.clock.schedule(200, &rig.arm, false);
    rig.step();

    assert_eq!(rig.panel.state(), PanelState::Locked);
    assert_eq!(rig.panel.last_reset(), Some(ResetCause::OutOfSequence));
}

#[test]
fn locked_panel_shows_red_everywhere() {
    let mut rig = Rig::new();

    rig.step();

    for which in [StageLed::Unlock, StageLed::Safety, StageLed::Armed] {
        assert_eq!(rig.led_lines(which), (false, true));
    }
}

#[test]
fn lockout_ends_with_greens_off() {
    let mut rig = Rig::armed();
    rig.clock.schedule(100, &rig.safety, false);
    rig.clock.schedule(100, &rig.arm, false);

    rig.enter("*");

    assert_eq!(rig.panel.last_reset(), Some(ResetCause::Abort));

    for which in [StageLed::Unlock, StageLed::Safety, StageLed::Armed] {
        assert!(!rig.led_lines(which).0);
    }
}
