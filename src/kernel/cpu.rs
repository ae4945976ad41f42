use super::{DispatchError, Event, EventKind, EventSink, ProcessControlBlock, Transition};

const FINISH_TOKEN: &str = "FIN";
const IO_PREFIX: &str = "ES";
const DEFAULT_IO_TICKS: u32 = 1;

/// A decoded instruction token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    Compute(&'a str),
    Io { ticks: u32 },
    Finish,
}

/// What executing an instruction did to the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Continue,
    Block(u32),
    Terminate,
}

/// The instruction interpreter.
pub struct Cpu;

impl Cpu {
    /// `FIN` terminates, `ES<n>` blocks for `n` ticks, anything else is plain compute.
    /// An `ES` token whose suffix is not a number blocks for one tick; an
    /// all-digit suffix too large for `u32` saturates instead.
    pub fn decode(token: &str) -> Instruction<'_> {
        if token == FINISH_TOKEN {
            return Instruction::Finish;
        }

        match token.strip_prefix(IO_PREFIX) {
            Some(suffix) => Instruction::Io {
                ticks: Cpu::parse_ticks(suffix),
            },
            None => Instruction::Compute(token),
        }
    }

    fn parse_ticks(suffix: &str) -> u32 {
        match suffix.parse() {
            Ok(ticks) => ticks,
            Err(_) if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) => u32::MAX,
            Err(_) => DEFAULT_IO_TICKS,
        }
    }

    /// Executes one already-fetched token on a running process and reports the effect.
    /// The instruction sequence itself is never touched.
    pub fn apply<S: EventSink>(
        pcb: &mut ProcessControlBlock,
        token: &str,
        cycle: u64,
        sink: &mut S,
    ) -> Result<Effect, DispatchError> {
        sink.record(&Event {
            cycle,
            process_id: pcb.get_id(),
            kind: EventKind::InstructionExecuted(token.to_string()),
        });

        let effect = match Cpu::decode(token) {
            Instruction::Finish => {
                pcb.transition(Transition::Exit)?;
                Effect::Terminate
            },
            Instruction::Io { ticks } => {
                pcb.block_for(ticks)?;
                Effect::Block(ticks)
            },
            Instruction::Compute(_) => Effect::Continue,
        };

        Ok(effect)
    }
}
