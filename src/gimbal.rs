use crate::hal::{AccessorySource, AttitudeSource, OutputSink};
use crate::scheduler::{Event, Source};
use crate::settings::SettingsStore;
use crate::{CameraStab, Error};

/// A stabilized camera gimbal and the objects it reads and writes.
pub struct Gimbal<A, C, S, O> {
    pub stab: CameraStab,
    pub attitude: A,
    pub accessories: C,
    pub settings: S,
    pub outputs: O,
}

impl<A, C, S, O> Gimbal<A, C, S, O>
where
    A: AttitudeSource,
    C: AccessorySource,
    S: SettingsStore,
    O: OutputSink,
{
    pub fn new(stab: CameraStab, attitude: A, accessories: C, settings: S, outputs: O) -> Self {
        Self {
            stab,
            attitude,
            accessories,
            settings,
            outputs,
        }
    }
}

/// Stabilize the camera after the attitude was updated.
/// Events raised for any other object are ignored.
pub fn attitude_updated<A, C, S, O>(event: Event<'_, Gimbal<A, C, S, O>>) -> Result<(), Error>
where
    A: AttitudeSource,
    C: AccessorySource,
    S: SettingsStore,
    O: OutputSink,
{
    if event.source != Source::AttitudeState {
        log::trace!("ignoring {:?} event", event.source);
        return Ok(());
    }

    let gimbal = event.state;
    let settings = gimbal.settings.settings();
    gimbal.stab.update(
        event.now,
        &settings,
        &mut gimbal.attitude,
        &mut gimbal.accessories,
        &mut gimbal.outputs,
    )
}
