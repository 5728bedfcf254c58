//! Beep amplitude envelope.
//!
//! Two states, count-driven: `Active` ramps the amplitude up over the
//! attack region, holds it through sustain, ramps it down over decay, then
//! drops to `Silent` for the repeat interval. The cycle repeats forever.

use crate::config::SynthConfig;
use crate::error::ConfigError;
use crate::fixed::Fix15;

/// Envelope state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeepState {
    /// A beep is sounding (attack / sustain / decay).
    Active,
    /// Between beeps; amplitude is zero.
    Silent,
}

/// Repeating attack/sustain/decay beep envelope.
///
/// [`tick()`](BeepEnvelope::tick) returns the amplitude for the current
/// sample and then advances the ramp and the state machine: the ramp
/// applied at tick `k` is first heard at tick `k + 1`, matching the order
/// the synthesis interrupt computes its output.
pub struct BeepEnvelope {
    state: BeepState,
    elapsed: u32,
    amplitude: Fix15,
    attack_ticks: u32,
    decay_ticks: u32,
    beep_ticks: u32,
    repeat_ticks: u32,
    attack_inc: Fix15,
    decay_inc: Fix15,
}

impl BeepEnvelope {
    /// Build from a validated configuration. The ramp increments are
    /// derived once here; the tick path only adds and subtracts.
    pub fn new(cfg: &SynthConfig) -> Result<BeepEnvelope, ConfigError> {
        cfg.validate()?;
        let max = Fix15::from_f32(cfg.max_amplitude);
        let attack_inc = max.div(Fix15::from_int(cfg.attack_ticks as i32))?;
        let decay_inc = max.div(Fix15::from_int(cfg.decay_ticks as i32))?;
        Ok(BeepEnvelope {
            state: BeepState::Active,
            elapsed: 0,
            amplitude: Fix15::ZERO,
            attack_ticks: cfg.attack_ticks,
            decay_ticks: cfg.decay_ticks,
            beep_ticks: cfg.beep_ticks,
            repeat_ticks: cfg.repeat_ticks,
            attack_inc,
            decay_inc,
        })
    }

    pub fn state(&self) -> BeepState {
        self.state
    }

    pub fn amplitude(&self) -> Fix15 {
        self.amplitude
    }

    /// One envelope step. Returns the amplitude to use for this tick.
    #[inline]
    pub fn tick(&mut self) -> Fix15 {
        match self.state {
            BeepState::Active => {
                let amplitude = self.amplitude;
                if self.elapsed < self.attack_ticks {
                    self.amplitude += self.attack_inc;
                } else if self.elapsed > self.beep_ticks - self.decay_ticks {
                    self.amplitude -= self.decay_inc;
                }
                self.elapsed += 1;
                if self.elapsed == self.beep_ticks {
                    self.state = BeepState::Silent;
                    self.amplitude = Fix15::ZERO;
                    self.elapsed = 0;
                }
                amplitude
            }
            BeepState::Silent => {
                self.elapsed += 1;
                if self.elapsed == self.repeat_ticks {
                    self.state = BeepState::Active;
                    self.elapsed = 0;
                }
                Fix15::ZERO
            }
        }
    }

    /// Run the envelope forward without producing output. Used to stagger
    /// the two cores' beep cycles at startup.
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_config() -> SynthConfig {
        SynthConfig {
            attack_ticks: 10,
            decay_ticks: 10,
            beep_ticks: 30,
            repeat_ticks: 20,
            ..SynthConfig::default()
        }
    }

    #[test]
    fn starts_active_and_silent_amplitude() {
        let env = BeepEnvelope::new(&short_config()).unwrap();
        assert_eq!(env.state(), BeepState::Active);
        assert_eq!(env.amplitude(), Fix15::ZERO);
    }

    #[test]
    fn attack_is_monotonically_non_decreasing() {
        let mut env = BeepEnvelope::new(&short_config()).unwrap();
        let mut prev = env.tick();
        for _ in 1..10 {
            let a = env.tick();
            assert!(a >= prev, "attack must ramp up");
            prev = a;
        }
        // Full ramp reaches the configured maximum.
        assert!((env.amplitude().to_f32() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn sustain_holds_constant() {
        let mut env = BeepEnvelope::new(&short_config()).unwrap();
        env.advance(10); // through attack
        let level = env.amplitude();
        // Sustain region: elapsed 10..=20 leaves the amplitude untouched.
        for _ in 0..11 {
            assert_eq!(env.tick(), level);
        }
    }

    #[test]
    fn decay_is_monotonically_non_increasing() {
        let mut env = BeepEnvelope::new(&short_config()).unwrap();
        env.advance(21); // attack + sustain + first decay step applied
        let mut prev = env.tick();
        while env.state() == BeepState::Active {
            let a = env.tick();
            assert!(a <= prev, "decay must ramp down");
            prev = a;
        }
    }

    #[test]
    fn silent_amplitude_is_exactly_zero() {
        let mut env = BeepEnvelope::new(&short_config()).unwrap();
        env.advance(30); // whole beep
        assert_eq!(env.state(), BeepState::Silent);
        for _ in 0..19 {
            assert_eq!(env.tick(), Fix15::ZERO);
            assert_eq!(env.amplitude(), Fix15::ZERO);
        }
    }

    #[test]
    fn full_cycle_length_is_beep_plus_repeat() {
        let cfg = short_config();
        let mut env = BeepEnvelope::new(&cfg).unwrap();
        // Exactly beep + repeat ticks returns to the start of Active.
        env.advance(cfg.beep_ticks + cfg.repeat_ticks - 1);
        assert_eq!(env.state(), BeepState::Silent);
        env.tick();
        assert_eq!(env.state(), BeepState::Active);
        assert_eq!(env.amplitude(), Fix15::ZERO);
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = SynthConfig {
            attack_ticks: 0,
            ..short_config()
        };
        assert!(BeepEnvelope::new(&cfg).is_err());
    }
}
