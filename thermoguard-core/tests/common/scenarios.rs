//! Pre-built room scenarios
//!
//! Each scenario pairs a temperature series with the tick numbers where a
//! real event was injected, so tests can check both detection and silence.

use super::generators::NoisyRoom;

/// Temperature series with known event positions
pub struct TestScenario {
    pub name: &'static str,
    pub temperatures: Vec<f32>,
    /// 1-based ticks where an abrupt change starts
    pub event_ticks: Vec<u64>,
}

pub struct Scenarios;

impl Scenarios {
    /// Quiet office: slow drift, sensor noise, nothing happens
    pub fn quiet_office(samples: usize) -> TestScenario {
        TestScenario {
            name: "quiet_office",
            temperatures: NoisyRoom::new(21.0).take(samples),
            event_ticks: Vec::new(),
        }
    }

    /// Window thrown open at `at` (1-based): a 6 °C drop in one sample
    pub fn window_opened(samples: usize, at: usize) -> TestScenario {
        let mut temperatures = NoisyRoom::new(22.0).take(samples);
        for t in temperatures.iter_mut().skip(at - 1) {
            *t -= 6.0;
        }

        TestScenario {
            name: "window_opened",
            temperatures,
            event_ticks: vec![at as u64],
        }
    }

    /// Heater fault at `at` (1-based): a 12 °C jump that stays
    pub fn heater_fault(samples: usize, at: usize) -> TestScenario {
        let mut temperatures = NoisyRoom::new(24.0).take(samples);
        for t in temperatures.iter_mut().skip(at - 1) {
            *t += 12.0;
        }

        TestScenario {
            name: "heater_fault",
            temperatures,
            event_ticks: vec![at as u64],
        }
    }
}
