//! Round-robin CPU dispatch simulator.
//!
//! Processes are sequences of instruction tokens: `FIN` terminates, `ES<n>`
//! blocks on simulated I/O for `n` ticks, anything else is a plain compute
//! step. The [`kernel::Dispatcher`] runs one process per cycle for up to a
//! fixed quantum, then ticks the blocked queue.

pub mod config;
pub mod io;
pub mod kernel;
