use std::collections::BTreeMap;

use super::{Event, EventKind, EventSink, QueueKind};

/// Per-process figures gathered from the event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub dispatches: u32,
    pub instructions: u32,
    pub io_ticks: u64,
    pub admitted_cycle: u64,
    pub terminated_cycle: Option<u64>,
}

impl ProcessStats {
    /// Cycles from admission to termination, once the process has terminated.
    pub fn turnaround_cycles(&self) -> Option<u64> {
        self.terminated_cycle.map(|done| done - self.admitted_cycle)
    }
}

#[derive(Debug, Default)]
pub struct StatsCollector {
    processes: BTreeMap<u32, ProcessStats>,
}

impl StatsCollector {
    pub fn new() -> StatsCollector {
        StatsCollector::default()
    }

    pub fn get(&self, process_id: u32) -> Option<&ProcessStats> {
        self.processes.get(&process_id)
    }

    /// All collected stats, ordered by process id.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ProcessStats)> + '_ {
        self.processes.iter().map(|(id, stats)| (*id, stats))
    }
}

impl EventSink for StatsCollector {
    fn record(&mut self, event: &Event) {
        let is_new = !self.processes.contains_key(&event.process_id);
        let stats = self.processes.entry(event.process_id).or_default();

        match &event.kind {
            EventKind::Enqueued(QueueKind::Ready) if is_new => stats.admitted_cycle = event.cycle,
            EventKind::Enqueued(_) => {},
            EventKind::Dispatched => stats.dispatches += 1,
            EventKind::InstructionExecuted(_) => stats.instructions += 1,
            EventKind::Blocked(ticks) => stats.io_ticks += u64::from(*ticks),
            EventKind::Terminated => stats.terminated_cycle = Some(event.cycle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stats: &mut StatsCollector, cycle: u64, kind: EventKind) {
        stats.record(&Event { cycle, process_id: 1, kind });
    }

    #[test]
    fn test_stats_collector_counts_events() {
        let mut stats = StatsCollector::new();
        record(&mut stats, 0, EventKind::Enqueued(QueueKind::Ready));
        record(&mut stats, 1, EventKind::Dispatched);
        record(&mut stats, 1, EventKind::InstructionExecuted("A".into()));
        record(&mut stats, 1, EventKind::InstructionExecuted("ES4".into()));
        record(&mut stats, 1, EventKind::Blocked(4));
        record(&mut stats, 1, EventKind::Enqueued(QueueKind::Blocked));
        record(&mut stats, 5, EventKind::Enqueued(QueueKind::Ready));
        record(&mut stats, 6, EventKind::Dispatched);
        record(&mut stats, 6, EventKind::InstructionExecuted("FIN".into()));
        record(&mut stats, 6, EventKind::Terminated);

        let process = stats.get(1).unwrap();
        assert_eq!(process.dispatches, 2);
        assert_eq!(process.instructions, 3);
        assert_eq!(process.io_ticks, 4);
        assert_eq!(process.admitted_cycle, 0);
        assert_eq!(process.turnaround_cycles(), Some(6));
    }

    #[test]
    fn test_stats_collector_unfinished_has_no_turnaround() {
        let mut stats = StatsCollector::new();
        record(&mut stats, 0, EventKind::Enqueued(QueueKind::Ready));

        assert_eq!(stats.get(1).unwrap().turnaround_cycles(), None);
        assert!(stats.get(2).is_none());
    }
}
