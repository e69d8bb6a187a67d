//! LED sequencer: one LED lit per serviced press, walking four positions.

use drivers::hal::gpio::GpioPort;

use crate::config::LED_CHANNEL;

pub const PATTERNS: [u32; 4] = [0x1, 0x2, 0x4, 0x8];

/// LED value shown for `counter`.
pub const fn pattern(counter: u8) -> u32 {
    PATTERNS[(counter as usize) % PATTERNS.len()]
}

/// What one step put on the LEDs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Step {
    pub pattern: u32,
    /// Counter value the pattern was taken from
    pub counter: u8,
}

/// Owns the LED port and the sequence counter. Main loop only.
pub struct LedSequencer<G> {
    leds: G,
    counter: u8,
}

impl<G: GpioPort> LedSequencer<G> {
    pub fn new(leds: G) -> Self {
        Self { leds, counter: 0 }
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Show the current pattern and move the counter on.
    pub fn advance(&mut self) -> Step {
        let step = Step {
            pattern: pattern(self.counter),
            counter: self.counter,
        };
        self.leds.write(LED_CHANNEL, step.pattern).ok();
        self.counter = (self.counter + 1) % PATTERNS.len() as u8;
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivers::hal::gpio::Channel;
    use drivers::mock::MockGpio;
    use pretty_assertions::assert_eq;

    #[test]
    fn pattern_is_one_hot_and_cycles() {
        for n in 0..4u8 {
            assert_eq!(pattern(n), 1 << n);
        }
        assert_eq!(pattern(4), 0x1);
    }

    #[test]
    fn fifth_step_wraps_to_the_first_led() {
        let leds = MockGpio::output_only();
        let mut sequencer = LedSequencer::new(leds.clone());

        let counters: std::vec::Vec<u8> = (0..5).map(|_| sequencer.advance().counter).collect();

        assert_eq!(counters, [0, 1, 2, 3, 0]);
        assert_eq!(leds.writes(Channel::One), [0x1, 0x2, 0x4, 0x8, 0x1]);
        assert_eq!(sequencer.counter(), 1);
    }
}
