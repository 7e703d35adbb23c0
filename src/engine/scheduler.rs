#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    HideBonus,
    EndPreyState,
    ResumeAfterDeath,
}

#[derive(Clone, Copy, Debug)]
struct ScheduledTask {
    fire_at: u64,
    seq: u64,
    action: TimerAction,
}

/// One-shot timers keyed by action. Starting an action that is already
/// pending restarts it.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_seq: u64,
}

impl Scheduler {
    pub fn start(&mut self, action: TimerAction, now: u64, duration_ticks: u64) {
        self.cancel(action);
        self.tasks.push(ScheduledTask {
            fire_at: now.saturating_add(duration_ticks),
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    pub fn cancel(&mut self, action: TimerAction) {
        self.tasks.retain(|task| task.action != action);
    }

    pub fn is_active(&self, action: TimerAction) -> bool {
        self.tasks.iter().any(|task| task.action == action)
    }

    #[cfg(test)]
    fn fires_at(&self, action: TimerAction) -> Option<u64> {
        self.tasks
            .iter()
            .find(|task| task.action == action)
            .map(|task| task.fire_at)
    }

    /// Removes and returns every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: u64) -> Vec<TimerAction> {
        let mut due: Vec<ScheduledTask> = self
            .tasks
            .iter()
            .copied()
            .filter(|task| task.fire_at <= now)
            .collect();
        if due.is_empty() {
            return Vec::new();
        }
        self.tasks.retain(|task| task.fire_at > now);
        due.sort_by_key(|task| (task.fire_at, task.seq));
        due.into_iter().map(|task| task.action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_once_in_deadline_order() {
        let mut scheduler = Scheduler::default();
        scheduler.start(TimerAction::EndPreyState, 0, 10);
        scheduler.start(TimerAction::HideBonus, 0, 5);

        assert!(scheduler.take_due(4).is_empty());
        assert_eq!(scheduler.take_due(5), vec![TimerAction::HideBonus]);
        assert_eq!(scheduler.take_due(20), vec![TimerAction::EndPreyState]);
        assert!(scheduler.take_due(30).is_empty());
    }

    #[test]
    fn restarting_replaces_the_pending_deadline() {
        let mut scheduler = Scheduler::default();
        scheduler.start(TimerAction::EndPreyState, 0, 10);
        scheduler.start(TimerAction::EndPreyState, 8, 10);
        assert_eq!(scheduler.fires_at(TimerAction::EndPreyState), Some(18));
        assert!(scheduler.take_due(10).is_empty());
        assert_eq!(scheduler.take_due(18), vec![TimerAction::EndPreyState]);
    }

    #[test]
    fn cancel_drops_the_task() {
        let mut scheduler = Scheduler::default();
        scheduler.start(TimerAction::ResumeAfterDeath, 0, 3);
        assert!(scheduler.is_active(TimerAction::ResumeAfterDeath));
        scheduler.cancel(TimerAction::ResumeAfterDeath);
        assert!(!scheduler.is_active(TimerAction::ResumeAfterDeath));
        assert!(scheduler.take_due(10).is_empty());
    }
}
