//! # Camera stabilization
//!
//! Each cycle the attitude of every axis is optionally low pass filtered and fed
//! forward, combined with the pilot input for that axis, then normalized to
//! [-1, 1] and routed to the camera outputs.
//!
//! Axes are processed roll, pitch, then yaw. A roll/pitch mixed gimbal needs the
//! roll output of the same cycle when writing pitch, see [`OutputRouter`].

use crate::filter::{bound, FeedForward, FeedForwardParams, ResponseFilter};
use crate::hal::{AccessorySource, AttitudeSource, OutputSink};
use crate::mixing::OutputRouter;
use crate::scheduler::{Source, Task};
use crate::settings::{
    Axis, AxisSettings, GimbalType, InputSource, ModuleSettings, SettingsStore,
    StabilizationMode, StabilizationSettings,
};
use crate::{gimbal, Error, Gimbal};
use embedded_time::duration::Milliseconds;
use nalgebra::Vector3;
use num_traits::Float;

/// Nominal time between cycles in milliseconds.
pub const SAMPLE_PERIOD_MS: u32 = 10;

/// State kept for a single axis between cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisState {
    /// Input contribution in degrees. Accumulated in axis lock mode.
    input: f32,
    response: ResponseFilter<f32>,
    feed_forward: FeedForward<f32>,
}

impl AxisState {
    /// The input contribution (the held angle in axis lock mode) in degrees.
    pub fn locked_input(&self) -> f32 {
        self.input
    }

    pub fn filtered_attitude(&self) -> f32 {
        self.response.output()
    }

    pub fn last_attitude(&self) -> f32 {
        self.feed_forward.last_attitude()
    }

    pub fn last_filtered_attitude(&self) -> f32 {
        self.feed_forward.last_filtered()
    }

    pub fn feed_forward_accumulator(&self) -> f32 {
        self.feed_forward.accumulator()
    }

    /// Update the input contribution from an accessory `value`.
    pub fn shape_input(&mut self, settings: &AxisSettings, value: f32, dt: f32) {
        match settings.mode {
            StabilizationMode::Attitude => self.input = value * settings.input_range,
            StabilizationMode::AxisLock => {
                let rate = value * settings.input_rate;
                // Small rates are stick noise, holding prevents drift
                if Float::abs(rate) > settings.max_axis_lock_rate {
                    self.input = bound(self.input + rate * 0.001 * dt, settings.input_range);
                }
            }
        }
    }
}

/// Camera stabilization module state.
#[derive(Clone, Debug)]
pub struct CameraStab {
    axes: [AxisState; 3],
    last_cycle: Milliseconds<u32>,
}

impl CameraStab {
    /// Create zeroed state, starting the cycle timer at `now`.
    pub fn new(now: Milliseconds<u32>) -> Self {
        Self {
            axes: [AxisState::default(); 3],
            last_cycle: now,
        }
    }

    /// Activate the module if it is enabled in `modules`.
    pub fn initialize(modules: &ModuleSettings, now: Milliseconds<u32>) -> Result<Self, Error> {
        if !modules.camera_stab_enabled() {
            log::debug!("camera stabilization disabled");
            return Err(Error::Disabled);
        }

        log::info!("camera stabilization enabled");
        Ok(Self::new(now))
    }

    /// Create the periodic task running this module on attitude updates.
    pub fn task<A, C, S, O>() -> Task<Gimbal<A, C, S, O>>
    where
        A: AttitudeSource,
        C: AccessorySource,
        S: SettingsStore,
        O: OutputSink,
    {
        Task::new(gimbal::attitude_updated, Source::AttitudeState)
            .with_hz(1000. / SAMPLE_PERIOD_MS as f32)
    }

    pub fn axis(&self, axis: Axis) -> &AxisState {
        &self.axes[axis.index()]
    }

    pub fn last_cycle(&self) -> Milliseconds<u32> {
        self.last_cycle
    }

    /// Calculate the time step (in milliseconds) since the last cycle and start a new one.
    pub fn elapsed(&mut self, now: Milliseconds<u32>) -> f32 {
        let dt = if now.0 > self.last_cycle.0 {
            (now.0 - self.last_cycle.0) as f32
        } else {
            log::debug!("clock did not advance, using nominal period");
            SAMPLE_PERIOD_MS as f32
        };
        self.last_cycle = now;
        dt
    }

    /// Run a single stabilization cycle at time `now`.
    ///
    /// Accessory channels that cannot be read keep their previous contribution.
    pub fn update<A, C, O>(
        &mut self,
        now: Milliseconds<u32>,
        settings: &StabilizationSettings,
        attitude: &mut A,
        accessories: &mut C,
        outputs: &mut O,
    ) -> Result<(), Error>
    where
        A: AttitudeSource + ?Sized,
        C: AccessorySource + ?Sized,
        O: OutputSink + ?Sized,
    {
        let dt = self.elapsed(now);
        let current = attitude.attitude();
        let mut router = OutputRouter::new(settings);

        for axis in Axis::ALL {
            let axis_settings = settings.axis(axis);
            let state = &mut self.axes[axis.index()];

            if let InputSource::Accessory(index) = axis_settings.input {
                match accessories.accessory(index) {
                    Some(value) => state.shape_input(axis_settings, value, dt),
                    None => log::trace!("accessory {} unavailable for {:?}", index, axis),
                }
            }

            let mut angle = current[axis.index()];
            if axis_settings.response_time > 0. {
                angle = state.response.apply(angle, axis_settings.response_time, dt);
            }

            if axis_settings.feed_forward != 0. {
                let params = FeedForwardParams {
                    gain: axis_settings.feed_forward,
                    correction: gimbal_correction(settings, axis, &current),
                    accel_time: axis_settings.accel_time,
                    decel_time: axis_settings.decel_time,
                    max_accel: axis_settings.max_accel,
                };
                angle = state.feed_forward.apply(angle, &params, dt);
            }

            // Elevon mixing bounds the unmixed outputs, limiting the mixed range
            // needs both roll and pitch to be limited
            let output = bound((angle + state.input) / axis_settings.output_range, 1.);

            router.route(axis, output, outputs)?;
        }

        Ok(())
    }
}

/// Feed forward gain correction for the reduced authority of a gimbal stage
/// near the travel limit of the stage it is mounted on.
pub fn gimbal_correction(
    settings: &StabilizationSettings,
    axis: Axis,
    attitude: &Vector3<f32>,
) -> f32 {
    match (settings.gimbal_type, axis) {
        (GimbalType::YawRollPitch, Axis::Roll) => {
            let range = settings.axis(Axis::Pitch).output_range;
            (range - Float::abs(attitude[Axis::Pitch.index()])) / range
        }
        (GimbalType::YawPitchRoll, Axis::Pitch) => {
            let range = settings.axis(Axis::Roll).output_range;
            (range - Float::abs(attitude[Axis::Roll.index()])) / range
        }
        _ => 1.,
    }
}
