use std::collections::HashSet;

use log::trace;

use super::*;

/// How the dispatched process left the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Preempted,
    Blocked(u32),
    Terminated,
}

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleReport {
    pub cycle: u64,
    /// The process that held the CPU this cycle, if any, and how it left.
    pub dispatched: Option<(u32, Outcome)>,
    /// Processes whose I/O completed on this cycle's tick, in the order they were made ready.
    pub unblocked: Vec<u32>,
}

impl CycleReport {
    pub fn is_idle(&self) -> bool {
        self.dispatched.is_none()
    }
}

/// Owns the ready and blocked queues and runs one dispatch cycle at a time.
pub struct Dispatcher<S: EventSink> {
    ready: ReadyQueue,
    blocked: BlockedQueue,
    sink: S,
    admitted: HashSet<u32>,
    cycle: u64,
}

impl<S: EventSink> Dispatcher<S> {
    pub fn with_sink(sink: S) -> Dispatcher<S> {
        Dispatcher {
            ready: ReadyQueue::new(),
            blocked: BlockedQueue::new(),
            sink,
            admitted: HashSet::new(),
            cycle: 0,
        }
    }

    /// Moves a new process into the ready queue. Ids are never reused.
    pub fn admit(&mut self, mut pcb: ProcessControlBlock) -> Result<(), DispatchError> {
        let id = pcb.get_id();

        if pcb.get_state() != ProcessState::New {
            return Err(DispatchError::InvalidAdmission { id, state: pcb.get_state() });
        }
        if !self.admitted.insert(id) {
            return Err(DispatchError::DuplicateProcess(id));
        }

        pcb.transition(Transition::Admit)?;
        self.push_ready(pcb);
        Ok(())
    }

    pub fn admit_all<I>(&mut self, pcbs: I) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = ProcessControlBlock>,
    {
        pcbs.into_iter().try_for_each(|pcb| self.admit(pcb))
    }

    /// One dispatch cycle: run the head of the ready queue for up to `quantum`
    /// instructions, file it according to how it left the CPU, then tick the
    /// blocked queue once.
    pub fn run_cycle(&mut self, quantum: usize) -> Result<CycleReport, DispatchError> {
        if quantum == 0 {
            return Err(DispatchError::InvalidQuantum(quantum));
        }

        self.cycle += 1;
        let mut report = CycleReport {
            cycle: self.cycle,
            ..CycleReport::default()
        };

        if let Some(pcb) = self.ready.dequeue() {
            let id = pcb.get_id();
            let outcome = self.execute(pcb, quantum)?;
            report.dispatched = Some((id, outcome));
        } else {
            trace!("cycle {}: ready queue empty, CPU idle", self.cycle);
        }

        for mut pcb in self.blocked.tick() {
            pcb.transition(Transition::IoComplete)?;
            report.unblocked.push(pcb.get_id());
            self.push_ready(pcb);
        }

        self.check_ownership()?;

        Ok(report)
    }

    fn execute(&mut self, mut pcb: ProcessControlBlock, quantum: usize) -> Result<Outcome, DispatchError> {
        pcb.transition(Transition::Dispatch)?;
        self.emit(pcb.get_id(), EventKind::Dispatched);

        let mut effect = Effect::Continue;
        for _ in 0..quantum {
            let token = match pcb.fetch() {
                Some(token) => token.to_string(),
                None => {
                    trace!("process {} ran past its last instruction", pcb.get_id());
                    pcb.transition(Transition::Exit)?;
                    effect = Effect::Terminate;
                    break;
                },
            };

            effect = Cpu::apply(&mut pcb, &token, self.cycle, &mut self.sink)?;
            if effect != Effect::Continue {
                break;
            }
        }

        let id = pcb.get_id();
        let outcome = match effect {
            Effect::Continue => {
                pcb.transition(Transition::QuantumExpired)?;
                self.push_ready(pcb);
                Outcome::Preempted
            },
            Effect::Block(ticks) => {
                self.emit(id, EventKind::Blocked(ticks));
                self.emit(id, EventKind::Enqueued(QueueKind::Blocked));
                self.blocked.enqueue(pcb);
                Outcome::Blocked(ticks)
            },
            Effect::Terminate => {
                self.emit(id, EventKind::Terminated);
                Outcome::Terminated
            },
        };

        trace!("cycle {}: process {} -> {:?}", self.cycle, id, outcome);
        Ok(outcome)
    }

    fn push_ready(&mut self, pcb: ProcessControlBlock) {
        self.emit(pcb.get_id(), EventKind::Enqueued(QueueKind::Ready));
        self.ready.enqueue(pcb);
    }

    fn emit(&mut self, process_id: u32, kind: EventKind) {
        let event = Event {
            cycle: self.cycle,
            process_id,
            kind,
        };
        self.sink.record(&event);
    }

    /// Verifies that no process id is held by both queues, or twice by one.
    pub fn check_ownership(&self) -> Result<(), DispatchError> {
        let mut seen = HashSet::new();

        for id in self.ready.ids().chain(self.blocked.ids()) {
            if !seen.insert(id) {
                return Err(DispatchError::OwnershipViolation(id));
            }
        }

        Ok(())
    }

    /// True once both queues have drained.
    pub fn is_finished(&self) -> bool {
        self.ready.is_empty() && self.blocked.is_empty()
    }

    pub fn get_cycle(&self) -> u64 {
        self.cycle
    }

    pub fn ready_ids(&self) -> Vec<u32> {
        self.ready.ids().collect()
    }

    pub fn blocked_ids(&self) -> Vec<u32> {
        self.blocked.ids().collect()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
