use crate::settings::Axis;
use nalgebra::Vector3;

/// Something driven by a percentage in [-1, 1].
pub trait Actuator {
    /// Output a percentage in [-1, 1].
    fn output(&mut self, output: f32);
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn output(&mut self, output: f32) {
        (**self).output(output)
    }
}

/// The current vehicle attitude.
pub trait AttitudeSource {
    /// Read the (roll, pitch, yaw) attitude in degrees.
    fn attitude(&mut self) -> Vector3<f32>;

    /// Read the attitude of a single axis in degrees.
    fn axis_angle(&mut self, axis: Axis) -> f32 {
        self.attitude()[axis.index()]
    }
}

impl AttitudeSource for Vector3<f32> {
    fn attitude(&mut self) -> Vector3<f32> {
        *self
    }
}

/// Pilot or auxiliary inputs.
pub trait AccessorySource {
    /// Read the normalized value of accessory channel `index`,
    /// or `None` if the channel is unavailable.
    fn accessory(&mut self, index: u8) -> Option<f32>;
}

impl<const N: usize> AccessorySource for [Option<f32>; N] {
    fn accessory(&mut self, index: u8) -> Option<f32> {
        self.get(index as usize).copied().flatten()
    }
}

/// A camera output channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputChannel {
    /// Roll, or servo 1 when roll and pitch are mixed.
    RollOrServo1,
    /// Pitch, or servo 2 when roll and pitch are mixed.
    PitchOrServo2,
    Yaw,
}

impl OutputChannel {
    /// The channel an axis is routed to when nothing is mixed.
    pub const fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Roll => OutputChannel::RollOrServo1,
            Axis::Pitch => OutputChannel::PitchOrServo2,
            Axis::Yaw => OutputChannel::Yaw,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            OutputChannel::RollOrServo1 => 0,
            OutputChannel::PitchOrServo2 => 1,
            OutputChannel::Yaw => 2,
        }
    }
}

/// Consumer of the normalized camera commands.
pub trait OutputSink {
    fn set(&mut self, channel: OutputChannel, output: f32);
}

/// The last desired camera outputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraDesired {
    pub output: Vector3<f32>,
    /// Number of writes to each channel.
    pub writes: [u32; 3],
}

impl Default for CameraDesired {
    fn default() -> Self {
        Self {
            output: Vector3::zeros(),
            writes: [0; 3],
        }
    }
}

impl CameraDesired {
    pub fn get(&self, channel: OutputChannel) -> f32 {
        self.output[channel.index()]
    }
}

impl OutputSink for CameraDesired {
    fn set(&mut self, channel: OutputChannel, output: f32) {
        self.output[channel.index()] = output;
        self.writes[channel.index()] += 1;
    }
}

/// Output each channel to its own servo.
pub struct ServoOutputs<A, B, C> {
    pub servo1: A,
    pub servo2: B,
    pub yaw: C,
}

impl<A, B, C> ServoOutputs<A, B, C> {
    pub fn new(servo1: A, servo2: B, yaw: C) -> Self {
        Self {
            servo1,
            servo2,
            yaw,
        }
    }
}

impl<A, B, C> OutputSink for ServoOutputs<A, B, C>
where
    A: Actuator,
    B: Actuator,
    C: Actuator,
{
    fn set(&mut self, channel: OutputChannel, output: f32) {
        match channel {
            OutputChannel::RollOrServo1 => self.servo1.output(output),
            OutputChannel::PitchOrServo2 => self.servo2.output(output),
            OutputChannel::Yaw => self.yaw.output(output),
        }
    }
}
