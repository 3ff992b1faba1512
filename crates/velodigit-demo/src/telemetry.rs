//! Simulated speed source feeding the readout.

use velodigit_core::Readout;

/// Speed that ramps up and down, with a running average.
#[derive(Debug, Default)]
pub struct SimulatedSpeed {
    samples: u32,
    total: f64,
}

impl SimulatedSpeed {
    pub fn sample(&mut self, step: u32) -> Readout {
        let phase = step as f32 / 30.0;
        let speed = 25.0 + 10.0 * phase.sin();
        self.samples += 1;
        self.total += speed as f64;
        Readout {
            speed,
            average_speed: (self.total / self.samples as f64) as f32,
        }
    }
}
