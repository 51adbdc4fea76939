use num_traits::Float;

/// Bound `val` to `[-limit, limit]`.
pub fn bound<T: Float>(val: T, limit: T) -> T {
    if val > limit {
        limit
    } else if val < -limit {
        -limit
    } else {
        val
    }
}

/// First order low pass filter with a time constant instead of a cutoff frequency.
///
/// The weight of each sample follows the time step, so the filter keeps the same
/// response when the loop runs late or early.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResponseFilter<T> {
    output: T,
}

impl<T: Float> ResponseFilter<T> {
    /// Filter `sample` with `response_time` and time step `dt` (both in milliseconds).
    /// A zero response time passes the sample through and leaves the filter untouched.
    pub fn apply(&mut self, sample: T, response_time: T, dt: T) -> T {
        if response_time <= T::zero() {
            return sample;
        }

        self.output = (response_time * self.output + dt * sample) / (response_time + dt);
        self.output
    }

    pub fn output(&self) -> T {
        self.output
    }

    pub fn reset(&mut self, value: T) {
        self.output = value;
    }
}

/// Parameters of a [`FeedForward`] step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedForwardParams<T> {
    pub gain: T,
    /// Geometry correction scaling the gain, 1 for none.
    pub correction: T,
    /// Decay time constant (in milliseconds) while the accumulator is positive.
    pub accel_time: T,
    /// Decay time constant (in milliseconds) otherwise.
    pub decel_time: T,
    /// Largest rate of change (in units/second) of the output.
    pub max_accel: T,
}

/// Leaky feed forward of the attitude rate of change, with an acceleration limit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeedForward<T> {
    last_attitude: T,
    last_filtered: T,
    accumulator: T,
}

impl<T: Float + From<f32>> FeedForward<T> {
    /// Apply feed forward to `attitude` with time step `dt` in milliseconds.
    pub fn apply(&mut self, attitude: T, params: &FeedForwardParams<T>, dt: T) -> T {
        let mut attitude = attitude;

        // Kick from the change since the last step
        let mut accumulator = self.accumulator
            + (attitude - self.last_attitude) * params.gain * params.correction;
        self.last_attitude = attitude;
        attitude = attitude + accumulator;

        // Leak the accumulator, the settled value is added again
        let time = if accumulator > T::zero() {
            params.accel_time
        } else {
            params.decel_time
        };
        let filter = (time / dt).max(T::one());
        accumulator = accumulator - accumulator / filter;
        self.accumulator = accumulator;
        attitude = attitude + accumulator;

        // Acceleration limit
        let delta = attitude - self.last_filtered;
        let max_delta = params.max_accel * <T as From<f32>>::from(0.001) * dt;
        if delta.abs() > max_delta {
            attitude = if delta > T::zero() {
                self.last_filtered + max_delta
            } else {
                self.last_filtered - max_delta
            };
        }
        self.last_filtered = attitude;

        attitude
    }

    /// The raw attitude seen by the last step.
    pub fn last_attitude(&self) -> T {
        self.last_attitude
    }

    /// The output of the last step.
    pub fn last_filtered(&self) -> T {
        self.last_filtered
    }

    pub fn accumulator(&self) -> T {
        self.accumulator
    }
}
