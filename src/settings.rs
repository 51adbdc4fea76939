//! Camera stabilization settings.
//!
//! Raw configuration values cross into this crate through the `TryFrom<u8>`
//! impls below, so the transform itself only ever sees valid variants.

use crate::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of accessory channels an axis can be driven from.
pub const ACCESSORY_CHANNELS: u8 = 6;

/// A gimbal axis.
///
/// Axes are always processed in the order of [`Axis::ALL`]:
/// roll first, then pitch, then yaw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    Roll,
    Pitch,
    Yaw,
}

impl Axis {
    /// Every axis in processing order.
    pub const ALL: [Axis; 3] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    /// The index of this axis into per-axis arrays and vectors.
    pub const fn index(self) -> usize {
        match self {
            Axis::Roll => 0,
            Axis::Pitch => 1,
            Axis::Yaw => 2,
        }
    }
}

impl TryFrom<u8> for Axis {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Axis::Roll),
            1 => Ok(Axis::Pitch),
            2 => Ok(Axis::Yaw),
            _ => Err(Error::InvalidAxis(raw)),
        }
    }
}

/// The accessory channel, if any, feeding an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputSource {
    #[default]
    None,
    Accessory(u8),
}

impl TryFrom<u8> for InputSource {
    type Error = Error;

    /// Decode `0..=5` as `Accessory0..Accessory5` and `6` as `None`.
    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            n if n < ACCESSORY_CHANNELS => Ok(InputSource::Accessory(n)),
            n if n == ACCESSORY_CHANNELS => Ok(InputSource::None),
            _ => Err(Error::InvalidInput(raw)),
        }
    }
}

/// How the accessory value of an axis is turned into an angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StabilizationMode {
    /// The accessory value commands an absolute angle.
    #[default]
    Attitude,
    /// The accessory value commands a rate that is integrated into a held angle.
    AxisLock,
}

impl TryFrom<u8> for StabilizationMode {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(StabilizationMode::Attitude),
            1 => Ok(StabilizationMode::AxisLock),
            _ => Err(Error::InvalidMode(raw)),
        }
    }
}

/// Mechanical layout of the gimbal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GimbalType {
    #[default]
    Generic,
    /// Yaw, then roll, then pitch stage. Roll authority shrinks as pitch nears its limit.
    YawRollPitch,
    /// Yaw, then pitch, then roll stage. Pitch authority shrinks as roll nears its limit.
    YawPitchRoll,
    /// Two servos mixing roll and pitch like elevons.
    RollPitchMixed,
}

impl TryFrom<u8> for GimbalType {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(GimbalType::Generic),
            1 => Ok(GimbalType::YawRollPitch),
            2 => Ok(GimbalType::YawPitchRoll),
            3 => Ok(GimbalType::RollPitchMixed),
            _ => Err(Error::InvalidGimbalType(raw)),
        }
    }
}

/// Settings for a single axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisSettings {
    /// Accessory channel driving this axis.
    pub input: InputSource,
    pub mode: StabilizationMode,
    /// Scale (in degrees) applied to the accessory value in attitude mode,
    /// and the bound of the held angle in axis lock mode.
    pub input_range: f32,
    /// Scale (in degrees/second) applied to the accessory value in axis lock mode.
    pub input_rate: f32,
    /// Rates (in degrees/second) at or below this are ignored in axis lock mode.
    pub max_axis_lock_rate: f32,
    /// Angle (in degrees) mapped to a full scale output.
    pub output_range: f32,
    /// Low pass time constant (in milliseconds), 0 disables the filter.
    pub response_time: f32,
    /// Feed forward gain, 0 disables feed forward.
    pub feed_forward: f32,
    /// Feed forward decay time constant (in milliseconds) while accelerating.
    pub accel_time: f32,
    /// Feed forward decay time constant (in milliseconds) while decelerating.
    pub decel_time: f32,
    /// Largest rate of change (in degrees/second) feed forward may introduce.
    pub max_accel: f32,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            input: InputSource::None,
            mode: StabilizationMode::Attitude,
            input_range: 20.,
            input_rate: 50.,
            max_axis_lock_rate: 1.,
            output_range: 20.,
            response_time: 0.,
            feed_forward: 0.,
            accel_time: 5.,
            decel_time: 5.,
            max_accel: 500.,
        }
    }
}

/// Settings for the whole gimbal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StabilizationSettings {
    /// Per axis settings, indexed by [`Axis::index`].
    pub axes: [AxisSettings; 3],
    pub gimbal_type: GimbalType,
    /// Reverse the pitch component of servo 1 when mixing roll and pitch.
    pub servo1_pitch_reverse: bool,
    /// Reverse the pitch component of servo 2 when mixing roll and pitch.
    pub servo2_pitch_reverse: bool,
}

impl StabilizationSettings {
    pub fn axis(&self, axis: Axis) -> &AxisSettings {
        &self.axes[axis.index()]
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisSettings {
        &mut self.axes[axis.index()]
    }

    /// Builder method to set the gimbal type and return `self`
    pub fn with_gimbal_type(mut self, gimbal_type: GimbalType) -> Self {
        self.gimbal_type = gimbal_type;
        self
    }

    /// Builder method to set the elevon pitch reversing and return `self`
    pub fn with_pitch_reverse(mut self, servo1: bool, servo2: bool) -> Self {
        self.servo1_pitch_reverse = servo1;
        self.servo2_pitch_reverse = servo2;
        self
    }
}

/// A store the settings are read from once per cycle.
pub trait SettingsStore {
    fn settings(&self) -> StabilizationSettings;
}

impl SettingsStore for StabilizationSettings {
    fn settings(&self) -> StabilizationSettings {
        *self
    }
}

/// The optional module flags read once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleSettings {
    pub camera_stab: bool,
}

impl ModuleSettings {
    /// Determines if camera stabilization should be activated.
    pub fn camera_stab_enabled(&self) -> bool {
        cfg!(feature = "builtin") || self.camera_stab
    }
}
