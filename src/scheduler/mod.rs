use crate::Error;
use embedded_time::{duration::Milliseconds, Clock};

mod task;
pub use task::{Event, Source, Task};

/// Runs periodic callbacks from a fixed rate loop.
pub struct Scheduler<'a, C, T, E = Error> {
    tasks: &'a mut [Task<T, E>],
    clock: C,
    tick_counter: u16,
    loop_rate_hz: u16,
}

impl<'a, C, T, E> Scheduler<'a, C, T, E>
where
    C: Clock<T = u32>,
    E: From<Error>,
{
    pub fn new(tasks: &'a mut [Task<T, E>], clock: C, loop_rate_hz: u16) -> Self {
        Self {
            tasks,
            clock,
            tick_counter: 0,
            loop_rate_hz,
        }
    }

    /// Advance one loop tick and run every task that is due.
    pub fn run(&mut self, system: &mut T) -> Result<(), E> {
        self.tick_counter = self.tick_counter.wrapping_add(1);
        let now = self.millis_since_epoch()?;

        for task in self.tasks.iter_mut() {
            let ticks = task.ticks(self.loop_rate_hz);
            if task.ready(self.tick_counter, ticks).is_none() {
                // this task is not yet scheduled to run again
                continue;
            }

            task.run(system, now, self.tick_counter)?;
        }

        Ok(())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn millis_since_epoch(&self) -> Result<Milliseconds<u32>, Error> {
        let instant = self.clock.try_now()?;
        Milliseconds::try_from(instant.duration_since_epoch()).map_err(Into::into)
    }
}
