use log::{debug, info};

/// Which holding area a process was put into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    Ready,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Enqueued(QueueKind),
    Dispatched,
    InstructionExecuted(String),
    Blocked(u32),
    Terminated,
}

/// A single observable step of the simulation.
///
/// `cycle` is the dispatch cycle the event happened in, starting at 1.
/// Admissions before the first cycle carry cycle 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub cycle: u64,
    pub process_id: u32,
    pub kind: EventKind,
}

/// Consumer of dispatcher events. Sinks only ever see a borrowed snapshot;
/// they have no access to the queues themselves.
pub trait EventSink {
    fn record(&mut self, event: &Event);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: &Event) {
        (**self).record(event);
    }
}

impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn record(&mut self, event: &Event) {
        self.0.record(event);
        self.1.record(event);
    }
}

/// Renders events through the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: &Event) {
        let (cycle, id) = (event.cycle, event.process_id);

        match &event.kind {
            EventKind::Enqueued(queue) => debug!("[{:>4}] process {} put into {:?} queue", cycle, id, queue),
            EventKind::Dispatched => info!("[{:>4}] process {} loaded into the CPU", cycle, id),
            EventKind::InstructionExecuted(token) => debug!("[{:>4}] process {} executes {}", cycle, id, token),
            EventKind::Blocked(ticks) => info!("[{:>4}] process {} blocked on I/O for {} ticks", cycle, id, ticks),
            EventKind::Terminated => info!("[{:>4}] process {} terminated", cycle, id),
        }
    }
}

/// Keeps every event in order. Useful for replaying or comparing runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn for_process(&self, process_id: u32) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.process_id == process_id)
    }

    pub fn executed_by(&self, process_id: u32) -> Vec<&str> {
        self.for_process(process_id)
            .filter_map(|e| match &e.kind {
                EventKind::InstructionExecuted(token) => Some(token.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
