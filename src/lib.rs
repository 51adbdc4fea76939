//! # embedded-camera-stab
//! A `#![no_std]` camera gimbal stabilization library for embedded rust
//!
//! Once per control cycle [`CameraStab`] turns the vehicle attitude and optional
//! accessory inputs into normalized servo commands for each gimbal axis.
//!
//! [`hal`] contains the traits for the attitude, accessory, and output objects.
//!
//! [`settings`] contains the stabilization settings and the module activation flags.
//!
//! [`filter`] contains the response time low pass and feed forward filters.
//!
//! [`scheduler`] runs [`CameraStab::task`] on attitude updates.
//!
//! ```
//! use embedded_camera_stab::hal::{CameraDesired, OutputChannel};
//! use embedded_camera_stab::settings::{Axis, ModuleSettings, StabilizationSettings};
//! use embedded_camera_stab::CameraStab;
//! use embedded_time::duration::Milliseconds;
//! use nalgebra::Vector3;
//!
//! let modules = ModuleSettings { camera_stab: true };
//! let mut stab = CameraStab::initialize(&modules, Milliseconds(0)).unwrap();
//!
//! let mut settings = StabilizationSettings::default();
//! settings.axis_mut(Axis::Yaw).output_range = 45.;
//!
//! let mut outputs = CameraDesired::default();
//! stab.update(
//!     Milliseconds(10),
//!     &settings,
//!     &mut Vector3::new(0., 0., 22.5f32),
//!     &mut [None::<f32>; 6],
//!     &mut outputs,
//! )
//! .unwrap();
//!
//! assert_eq!(outputs.get(OutputChannel::Yaw), 0.5);
//! ```

#![cfg_attr(not(test), no_std)]

mod error;
pub use error::Error;

pub mod filter;

mod gimbal;
pub use gimbal::{attitude_updated, Gimbal};

pub mod hal;
pub use hal::{AccessorySource, Actuator, AttitudeSource, OutputSink};

pub mod mixing;

pub mod scheduler;
pub use scheduler::Scheduler;

pub mod settings;
pub use settings::{Axis, GimbalType, StabilizationSettings};

pub mod stabilizer;
pub use stabilizer::CameraStab;
