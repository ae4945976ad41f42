mod blocked_queue;
mod cpu;
mod dispatcher;
mod error;
mod event;
mod process_control_block;
mod ready_queue;
mod stats;

pub use blocked_queue::BlockedQueue;
pub use cpu::{Cpu, Effect, Instruction};
pub use dispatcher::{CycleReport, Dispatcher, Outcome};
pub use error::DispatchError;
pub use event::{Event, EventKind, EventLog, EventSink, LogSink, QueueKind};
pub use process_control_block::{ProcessControlBlock, ProcessState, Transition};
pub use ready_queue::ReadyQueue;
pub use stats::{ProcessStats, StatsCollector};

pub mod driver;

pub use driver::{Driver, SimulationError};
