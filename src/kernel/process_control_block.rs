use crate::io::Program;

use super::DispatchError;

/// Lifecycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Blocked,
    Terminated,
}

/// Something that happens to a process and may move it to another state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Admit,
    Dispatch,
    QuantumExpired,
    RequestIo,
    Exit,
    IoComplete,
}

impl ProcessState {
    /// The state machine. Returns `None` when `transition` is not legal from `self`.
    pub fn next(self, transition: Transition) -> Option<ProcessState> {
        use ProcessState::*;
        use Transition::*;

        match (self, transition) {
            (New, Admit) => Some(Ready),
            (Ready, Dispatch) => Some(Running),
            (Running, QuantumExpired) => Some(Ready),
            (Running, RequestIo) => Some(Blocked),
            (Running, Exit) => Some(Terminated),
            (Blocked, IoComplete) => Some(Ready),
            _ => None,
        }
    }
}

/// The process control block. Holds a process's identity, scheduling state
/// and its immutable instruction sequence.
#[derive(Debug)]
pub struct ProcessControlBlock {
    id: u32,
    state: ProcessState,
    program_counter: usize,
    block_remaining: u32,
    instructions: Box<[String]>,
}

impl ProcessControlBlock {
    pub fn new(id: u32, instructions: Vec<String>) -> ProcessControlBlock {
        ProcessControlBlock {
            id,
            state: ProcessState::New,
            program_counter: 0,
            block_remaining: 0,
            instructions: instructions.into_boxed_slice(),
        }
    }

    pub fn get_id(&self) -> u32 {
        self.id
    }

    pub fn get_state(&self) -> ProcessState {
        self.state
    }

    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn get_block_remaining(&self) -> u32 {
        self.block_remaining
    }

    pub fn get_instructions(&self) -> &[String] {
        &self.instructions
    }

    pub fn is_exhausted(&self) -> bool {
        self.program_counter >= self.instructions.len()
    }

    /// Moves the process along the state machine, failing loudly on an illegal move.
    pub fn transition(&mut self, transition: Transition) -> Result<ProcessState, DispatchError> {
        let next = self.state.next(transition).ok_or(DispatchError::IllegalTransition {
            id: self.id,
            from: self.state,
            transition,
        })?;

        self.state = next;
        Ok(next)
    }

    /// Fetches the instruction at the program counter and advances past it.
    /// Returns `None` once the sequence is exhausted.
    pub fn fetch(&mut self) -> Option<&str> {
        let token = self.instructions.get(self.program_counter)?;
        self.program_counter += 1;
        Some(token.as_str())
    }

    pub fn block_for(&mut self, ticks: u32) -> Result<(), DispatchError> {
        self.transition(Transition::RequestIo)?;
        self.block_remaining = ticks;
        Ok(())
    }

    /// One blocked-queue tick. Returns true once the I/O has completed.
    pub fn tick_block(&mut self) -> bool {
        self.block_remaining = self.block_remaining.saturating_sub(1);
        self.block_remaining == 0
    }
}

impl From<Program> for ProcessControlBlock {
    fn from(program: Program) -> Self {
        ProcessControlBlock::new(program.id, program.instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcb(tokens: &[&str]) -> ProcessControlBlock {
        ProcessControlBlock::new(1, tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_state_machine_legal_transitions() {
        use ProcessState::*;
        use Transition::*;

        assert_eq!(New.next(Admit), Some(Ready));
        assert_eq!(Ready.next(Dispatch), Some(Running));
        assert_eq!(Running.next(QuantumExpired), Some(Ready));
        assert_eq!(Running.next(RequestIo), Some(Blocked));
        assert_eq!(Running.next(Exit), Some(Terminated));
        assert_eq!(Blocked.next(IoComplete), Some(Ready));
    }

    #[test]
    fn test_state_machine_terminated_is_absorbing() {
        use Transition::*;

        for transition in [Admit, Dispatch, QuantumExpired, RequestIo, Exit, IoComplete] {
            assert_eq!(ProcessState::Terminated.next(transition), None);
        }
    }

    #[test]
    fn test_state_machine_rejects_skipping_ready() {
        assert_eq!(ProcessState::New.next(Transition::Dispatch), None);
        assert_eq!(ProcessState::Blocked.next(Transition::Dispatch), None);
        assert_eq!(ProcessState::Ready.next(Transition::Exit), None);
    }

    #[test]
    fn test_pcb_starts_new_at_zero() {
        let pcb = pcb(&["INSTR1", "FIN"]);
        assert_eq!(pcb.get_state(), ProcessState::New);
        assert_eq!(pcb.get_program_counter(), 0);
        assert_eq!(pcb.get_block_remaining(), 0);
    }

    #[test]
    fn test_pcb_fetch_advances_until_exhausted() {
        let mut pcb = pcb(&["INSTR1", "FIN"]);
        assert_eq!(pcb.fetch(), Some("INSTR1"));
        assert_eq!(pcb.fetch(), Some("FIN"));
        assert!(pcb.is_exhausted());
        assert_eq!(pcb.fetch(), None);
        assert_eq!(pcb.get_program_counter(), 2);
    }

    #[test]
    fn test_pcb_illegal_transition_is_an_error() {
        let mut pcb = pcb(&[]);
        let result = pcb.transition(Transition::Dispatch);
        assert_eq!(
            result,
            Err(DispatchError::IllegalTransition {
                id: 1,
                from: ProcessState::New,
                transition: Transition::Dispatch,
            })
        );
        assert_eq!(pcb.get_state(), ProcessState::New);
    }

    #[test]
    fn test_pcb_block_countdown() {
        let mut pcb = pcb(&["ES2"]);
        pcb.transition(Transition::Admit).unwrap();
        pcb.transition(Transition::Dispatch).unwrap();
        pcb.block_for(2).unwrap();

        assert_eq!(pcb.get_state(), ProcessState::Blocked);
        assert!(!pcb.tick_block());
        assert!(pcb.tick_block());
        assert_eq!(pcb.get_block_remaining(), 0);
    }

    #[test]
    fn test_pcb_zero_block_completes_on_first_tick() {
        let mut pcb = pcb(&["ES0"]);
        pcb.transition(Transition::Admit).unwrap();
        pcb.transition(Transition::Dispatch).unwrap();
        pcb.block_for(0).unwrap();

        assert!(pcb.tick_block());
    }
}
