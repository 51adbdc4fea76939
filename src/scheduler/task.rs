use crate::Error;
use embedded_time::duration::Milliseconds;

/// The object whose update triggered an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    AttitudeState,
    AccessoryDesired,
    CameraStabSettings,
}

/// An event containing the current time, source, and state for a task.
pub struct Event<'a, T> {
    /// The state of the system running the scheduler.
    pub state: &'a mut T,

    /// The current time in milliseconds.
    pub now: Milliseconds<u32>,

    /// The object this event was raised for.
    pub source: Source,
}

type TaskFn<T, E> = fn(Event<'_, T>) -> Result<(), E>;

/// A periodic callback bound to an object's updates.
pub struct Task<T, E = Error> {
    /// The function to run.
    pub f: TaskFn<T, E>,

    /// The object this task is bound to.
    pub source: Source,

    /// The desired frequency (in hz) to run the task.
    pub hz: f32,

    /// The last tick this task was ran.
    pub last_run: u16,
}

impl<T, E> Task<T, E> {
    /// Create a new task from the function to run and the object it is bound to.
    pub fn new(f: TaskFn<T, E>, source: Source) -> Self {
        Self {
            f,
            source,
            hz: 0.,
            last_run: 0,
        }
    }

    /// Builder method to set `hz` and return `self`
    pub fn with_hz(mut self, hz: f32) -> Self {
        self.hz = hz;
        self
    }

    /// Calculate the desired ticks between each run of the task
    pub fn ticks(&self, loop_rate_hz: u16) -> u16 {
        // A 0hz task should be ran at the rate of the scheduler loop
        if self.hz <= 0. {
            return 1;
        }
        // Sub 1hz tasks span more ticks than the loop rate
        ((loop_rate_hz as f32 / self.hz) as u16).max(1)
    }

    /// If this task is ready returns the ticks elapsed since the last run.
    /// Otherwise this returns `None`.
    pub fn ready(&self, current_tick: u16, ticks: u16) -> Option<u16> {
        let dt = current_tick.wrapping_sub(self.last_run);

        if dt >= ticks {
            Some(dt)
        } else {
            None
        }
    }

    /// Run this task at the current tick.
    pub fn run(&mut self, state: &mut T, now: Milliseconds<u32>, tick: u16) -> Result<(), E> {
        (self.f)(Event {
            state,
            now,
            source: self.source,
        })?;

        // Record the tick counter when we ran
        // This determines when we next run the event
        self.last_run = tick;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(event: Event<'_, u32>) -> Result<(), Error> {
        *event.state += 1;
        Ok(())
    }

    #[test]
    fn ticks_follow_loop_rate() {
        let task: Task<u32> = Task::new(count, Source::AttitudeState);
        assert_eq!(task.ticks(1000), 1);
        assert_eq!(task.with_hz(100.).ticks(1000), 10);

        let task: Task<u32> = Task::new(count, Source::AttitudeState).with_hz(2000.);
        assert_eq!(task.ticks(1000), 1);
    }

    #[test]
    fn ticks_for_slow_tasks() {
        let task: Task<u32> = Task::new(count, Source::AttitudeState).with_hz(0.5);
        assert_eq!(task.ticks(1000), 2000);

        let task: Task<u32> = Task::new(count, Source::AttitudeState).with_hz(0.001);
        assert_eq!(task.ticks(1000), u16::MAX);
    }

    #[test]
    fn ready_after_interval() {
        let mut task: Task<u32> = Task::new(count, Source::AttitudeState);
        let mut runs = 0;
        task.run(&mut runs, Milliseconds(0), 5).unwrap();

        assert_eq!(runs, 1);
        assert_eq!(task.ready(10, 10), None);
        assert_eq!(task.ready(15, 10), Some(10));

        // Survives the tick counter wrapping
        task.last_run = u16::MAX - 1;
        assert_eq!(task.ready(8, 10), Some(10));
    }
}
