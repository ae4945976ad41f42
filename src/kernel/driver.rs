use log::info;

use super::*;

use crate::config::Config;
use crate::io::{loader, LoaderError, Program};

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("scheduler invariant violated: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Runs a whole simulation: loads the programs, admits them, and drives
/// dispatch cycles until both queues are empty.
pub struct Driver {
    config: Config,
}

impl Driver {
    pub fn new(config: Config) -> Driver {
        Driver { config }
    }

    /// Loads programs from the configured file, runs them, and prints the
    /// stats table. Returns the number of cycles run.
    pub fn start(&mut self) -> Result<u64, SimulationError> {
        info!("Starting the driver.");
        info!("Loading programs from {}.", self.config.program_file.display());
        let programs = loader::load_programs(&self.config.program_file)?;

        if programs.is_empty() {
            info!("No programs to run.");
            return Ok(0);
        }

        let (cycles, stats) = self.run(programs, LogSink)?;
        print_stats(&stats, self.config.quantum);

        Ok(cycles)
    }

    /// Runs `programs` to completion, reporting every event to `sink`.
    pub fn run<S: EventSink>(&self, programs: Vec<Program>, sink: S) -> Result<(u64, StatsCollector), SimulationError> {
        let mut dispatcher = Dispatcher::with_sink((sink, StatsCollector::new()));

        info!("Admitting {} processes into the ready queue.", programs.len());
        dispatcher.admit_all(programs.into_iter().map(ProcessControlBlock::from))?;

        info!("Running with a quantum of {} instructions.", self.config.quantum);
        while !dispatcher.is_finished() {
            dispatcher.run_cycle(self.config.quantum)?;
        }

        let cycles = dispatcher.get_cycle();
        info!("All processes finished after {} cycles.", cycles);

        let (_, stats) = dispatcher.into_sink();
        Ok((cycles, stats))
    }
}

fn print_stats(stats: &StatsCollector, quantum: usize) {
    println!("Stats for executed processes (Round Robin, quantum {}):", quantum);
    println!("... ID | Dispatches | Instructions | I/O Ticks | Turnaround (cycles)");
    println!("...----|------------|--------------|-----------|--------------------");
    for (id, process) in stats.iter() {
        println!(
            "... {:02} | {:>10} | {:>12} | {:>9} | {:>19}",
            id,
            process.dispatches,
            process.instructions,
            process.io_ticks,
            process.turnaround_cycles().unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(quantum: usize) -> Driver {
        Driver::new(Config {
            quantum,
            ..Config::default()
        })
    }

    #[test]
    fn test_driver_runs_sample_programs() {
        let programs = vec![
            Program::new(1, ["INSTR1", "INSTR2", "ES3", "FIN"]),
            Program::new(2, ["INSTR1", "ES2", "INSTR3", "FIN"]),
        ];
        let mut log = EventLog::new();

        let (cycles, stats) = driver(2).run(programs, &mut log).unwrap();

        assert_eq!(cycles, 6);
        assert_eq!(log.executed_by(1), vec!["INSTR1", "INSTR2", "ES3", "FIN"]);
        assert_eq!(log.executed_by(2), vec!["INSTR1", "ES2", "INSTR3", "FIN"]);
        assert_eq!(stats.get(1).unwrap().io_ticks, 3);
        assert_eq!(stats.get(2).unwrap().io_ticks, 2);
        assert_eq!(stats.get(1).unwrap().turnaround_cycles(), Some(6));
        assert_eq!(stats.get(2).unwrap().turnaround_cycles(), Some(4));
    }

    #[test]
    fn test_driver_empty_program_list() {
        let (cycles, stats) = driver(2).run(Vec::new(), EventLog::new()).unwrap();

        assert_eq!(cycles, 0);
        assert_eq!(stats.iter().count(), 0);
    }

    #[test]
    fn test_driver_duplicate_ids_fail() {
        let programs = vec![Program::new(1, ["FIN"]), Program::new(1, ["FIN"])];

        let result = driver(2).run(programs, EventLog::new());
        assert!(matches!(result, Err(SimulationError::Dispatch(DispatchError::DuplicateProcess(1)))));
    }

    #[test]
    fn test_driver_start_with_data_file() {
        let cycles = driver(2).start().unwrap();
        assert!(cycles > 0);
    }
}
