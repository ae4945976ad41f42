use super::{ProcessState, Transition};

/// Violations of the scheduler's structural invariants. These are fixture or
/// programming defects, never simulated conditions, and abort the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("quantum must be a positive number of instructions, got {0}")]
    InvalidQuantum(usize),
    #[error("process id {0} was already admitted")]
    DuplicateProcess(u32),
    #[error("process {id} cannot be admitted from state {state:?}")]
    InvalidAdmission { id: u32, state: ProcessState },
    #[error("process {id} cannot take {transition:?} from state {from:?}")]
    IllegalTransition {
        id: u32,
        from: ProcessState,
        transition: Transition,
    },
    #[error("process {0} is held by more than one queue")]
    OwnershipViolation(u32),
}
