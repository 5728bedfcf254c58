//! Per-core cooperative round-robin scheduler.

use heapless::Vec;
use log::info;

use crate::constants::MAX_TASKS;
use crate::error::ConfigError;
use crate::sched::{Clock, Task};

/// Polls a fixed set of tasks round-robin, forever. One instance per core;
/// tasks never migrate.
pub struct CoreScheduler<'a> {
    tasks: Vec<&'a mut (dyn Task + 'a), MAX_TASKS>,
}

impl<'a> CoreScheduler<'a> {
    pub fn new() -> CoreScheduler<'a> {
        CoreScheduler { tasks: Vec::new() }
    }

    /// Register a task. Fails once all slots are taken.
    pub fn add(&mut self, task: &'a mut (dyn Task + 'a)) -> Result<(), ConfigError> {
        self.tasks.push(task).map_err(|_| ConfigError::TooManyTasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Poll every task once. Pending tasks are simply polled again on the
    /// next round; that re-poll is the entire suspension mechanism.
    pub fn poll_all(&mut self, now_us: u64) {
        for task in self.tasks.iter_mut() {
            let _ = task.poll(now_us);
        }
    }

    /// Run the scheduler loop. Never returns; the tasks run for the
    /// process lifetime.
    pub fn run<C: Clock>(&mut self, clock: &C) -> ! {
        info!("scheduler started with {} tasks", self.tasks.len());
        loop {
            self.poll_all(clock.now_us());
        }
    }
}

impl<'a> Default for CoreScheduler<'a> {
    fn default() -> Self {
        CoreScheduler::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::Poll;

    struct CountingTask {
        polls: u32,
        ready_after: u32,
    }

    impl Task for CountingTask {
        fn poll(&mut self, _now_us: u64) -> Poll {
            self.polls += 1;
            if self.polls > self.ready_after {
                Poll::Ready
            } else {
                Poll::Pending
            }
        }
    }

    #[test]
    fn polls_every_task_each_round() {
        let mut a = CountingTask { polls: 0, ready_after: 100 };
        let mut b = CountingTask { polls: 0, ready_after: 0 };
        let mut sched = CoreScheduler::new();
        sched.add(&mut a).unwrap();
        sched.add(&mut b).unwrap();
        assert_eq!(sched.len(), 2);

        for now in 0..5 {
            sched.poll_all(now);
        }
        drop(sched);
        assert_eq!(a.polls, 5);
        assert_eq!(b.polls, 5);
    }

    #[test]
    fn pending_tasks_are_repolled() {
        let mut a = CountingTask { polls: 0, ready_after: 3 };
        let mut sched = CoreScheduler::new();
        sched.add(&mut a).unwrap();
        for now in 0..4 {
            sched.poll_all(now);
        }
        drop(sched);
        // Still polled after going Pending three times.
        assert_eq!(a.polls, 4);
    }

    #[test]
    fn slots_are_bounded() {
        let mut tasks: [CountingTask; MAX_TASKS + 1] =
            core::array::from_fn(|_| CountingTask { polls: 0, ready_after: 0 });
        let mut sched = CoreScheduler::new();
        let mut added = 0;
        for task in tasks.iter_mut() {
            match sched.add(task) {
                Ok(()) => added += 1,
                Err(e) => {
                    assert_eq!(e, ConfigError::TooManyTasks);
                    break;
                }
            }
        }
        assert_eq!(added, MAX_TASKS);
    }
}
