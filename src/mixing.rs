//! Routing of axis outputs to the camera output channels.

use crate::hal::{OutputChannel, OutputSink};
use crate::settings::{Axis, GimbalType, StabilizationSettings};
use crate::Error;

/// Mix an unmixed roll and pitch output into (servo 1, servo 2) outputs.
///
/// Roll reversing is left to the servo outputs themselves; these flags only
/// reverse the pitch component of each servo.
pub fn elevon(
    roll: f32,
    pitch: f32,
    servo1_pitch_reverse: bool,
    servo2_pitch_reverse: bool,
) -> (f32, f32) {
    let servo1 = if servo1_pitch_reverse {
        ((1. - pitch) + roll) / 2.
    } else {
        (pitch + roll) / 2.
    };

    let servo2 = if servo2_pitch_reverse {
        ((1. - pitch) - roll) / 2.
    } else {
        (pitch - roll) / 2.
    };

    (servo1, servo2)
}

/// Routes the bounded output of each axis for a single cycle.
///
/// For a [`GimbalType::RollPitchMixed`] gimbal the roll output is held until
/// pitch is routed, then both servos are written together.
#[derive(Debug)]
pub struct OutputRouter {
    gimbal_type: GimbalType,
    servo1_pitch_reverse: bool,
    servo2_pitch_reverse: bool,
    elevon_roll: Option<f32>,
}

impl OutputRouter {
    pub fn new(settings: &StabilizationSettings) -> Self {
        Self {
            gimbal_type: settings.gimbal_type,
            servo1_pitch_reverse: settings.servo1_pitch_reverse,
            servo2_pitch_reverse: settings.servo2_pitch_reverse,
            elevon_roll: None,
        }
    }

    /// Route the `output` of `axis` to `sink`.
    ///
    /// Returns [`Error::MixingOrder`] if pitch is mixed before roll in this cycle.
    pub fn route<O>(&mut self, axis: Axis, output: f32, sink: &mut O) -> Result<(), Error>
    where
        O: OutputSink + ?Sized,
    {
        if self.gimbal_type != GimbalType::RollPitchMixed {
            sink.set(OutputChannel::for_axis(axis), output);
            return Ok(());
        }

        match axis {
            Axis::Roll => self.elevon_roll = Some(output),
            Axis::Pitch => {
                let roll = self.elevon_roll.take().ok_or(Error::MixingOrder)?;
                let (servo1, servo2) = elevon(
                    roll,
                    output,
                    self.servo1_pitch_reverse,
                    self.servo2_pitch_reverse,
                );
                sink.set(OutputChannel::RollOrServo1, servo1);
                sink.set(OutputChannel::PitchOrServo2, servo2);
            }
            Axis::Yaw => sink.set(OutputChannel::Yaw, output),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::CameraDesired;
    use approx::assert_relative_eq;

    fn mixed(servo1: bool, servo2: bool) -> StabilizationSettings {
        StabilizationSettings::default()
            .with_gimbal_type(GimbalType::RollPitchMixed)
            .with_pitch_reverse(servo1, servo2)
    }

    #[test]
    fn elevon_is_invertible() {
        let values = [-1.0f32, -0.6, -0.25, 0.0, 0.3, 0.8, 1.0];
        for roll in values {
            for pitch in values {
                let (servo1, servo2) = elevon(roll, pitch, false, false);
                assert_relative_eq!(servo1 + servo2, pitch, epsilon = 1e-6);
                assert_relative_eq!(servo1 - servo2, roll, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn elevon_reverses_pitch() {
        let (servo1, servo2) = elevon(0.2, 0.4, true, false);
        assert_relative_eq!(servo1, 0.4);
        assert_relative_eq!(servo2, 0.1);

        let (servo1, servo2) = elevon(0.2, 0.4, false, true);
        assert_relative_eq!(servo1, 0.3);
        assert_relative_eq!(servo2, 0.2);
    }

    #[test]
    fn generic_routes_directly() {
        let mut router = OutputRouter::new(&StabilizationSettings::default());
        let mut sink = CameraDesired::default();
        for (axis, output) in Axis::ALL.into_iter().zip([0.1, 0.2, 0.3]) {
            router.route(axis, output, &mut sink).unwrap();
        }

        assert_eq!(sink.output, nalgebra::Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(sink.writes, [1, 1, 1]);
    }

    #[test]
    fn mixed_holds_roll_until_pitch() {
        let mut router = OutputRouter::new(&mixed(false, false));
        let mut sink = CameraDesired::default();

        router.route(Axis::Roll, 0.4, &mut sink).unwrap();
        assert_eq!(sink.writes, [0, 0, 0]);

        router.route(Axis::Pitch, 0.2, &mut sink).unwrap();
        assert_relative_eq!(sink.get(OutputChannel::RollOrServo1), 0.3);
        assert_relative_eq!(sink.get(OutputChannel::PitchOrServo2), -0.1);

        router.route(Axis::Yaw, -0.5, &mut sink).unwrap();
        assert_eq!(sink.get(OutputChannel::Yaw), -0.5);
        assert_eq!(sink.writes, [1, 1, 1]);
    }

    #[test]
    fn mixed_rejects_pitch_before_roll() {
        let mut router = OutputRouter::new(&mixed(false, false));
        let mut sink = CameraDesired::default();

        assert!(matches!(
            router.route(Axis::Pitch, 0.2, &mut sink),
            Err(Error::MixingOrder)
        ));
        assert_eq!(sink.writes, [0, 0, 0]);
    }
}
