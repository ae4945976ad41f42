use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::Program;

const JOB_CARD: &str = "// JOB";
const END_CARD: &str = "// END";
const CARD_PREFIX: &str = "//";

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read program file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: instruction outside of a job")]
    OrphanInstruction { line: usize },
    #[error("line {line}: job started before job {open} was ended")]
    UnterminatedJob { line: usize, open: u32 },
    #[error("line {line}: END card without an open job")]
    UnexpectedEnd { line: usize },
    #[error("line {line}: invalid job id {value:?}")]
    InvalidId { line: usize, value: String },
    #[error("line {line}: job id {id} is used more than once")]
    DuplicateId { line: usize, id: u32 },
    #[error("line {line}: unknown control card {card:?}")]
    UnknownCard { line: usize, card: String },
    #[error("job {0} is missing its END card")]
    MissingEnd(u32),
}

/// Reads the program file at `path`.
pub fn load_programs(path: impl AsRef<Path>) -> Result<Vec<Program>, LoaderError> {
    let path = path.as_ref();
    debug!("reading program file {}", path.display());

    let file = File::open(path)?;
    parse_programs(BufReader::new(file))
}

/// Parses job cards into programs, in file order:
///
/// ```text
/// // JOB 1
/// INSTR1 INSTR2
/// ES3
/// FIN
/// // END
/// ```
pub fn parse_programs<R: BufRead>(reader: R) -> Result<Vec<Program>, LoaderError> {
    let mut programs = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut current: Option<Program> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(job_info) = line.strip_prefix(JOB_CARD) {
            if let Some(open) = &current {
                return Err(LoaderError::UnterminatedJob { line: line_num, open: open.id });
            }

            let job_info = job_info.trim();
            let id: u32 = job_info.parse().map_err(|_| LoaderError::InvalidId {
                line: line_num,
                value: job_info.to_string(),
            })?;

            if !seen_ids.insert(id) {
                return Err(LoaderError::DuplicateId { line: line_num, id });
            }

            current = Some(Program::new(id, Vec::<String>::new()));
        } else if line.starts_with(END_CARD) {
            let program = current.take().ok_or(LoaderError::UnexpectedEnd { line: line_num })?;
            debug!("loaded job {} with {} instructions", program.id, program.instructions.len());
            programs.push(program);
        } else if line.starts_with(CARD_PREFIX) {
            return Err(LoaderError::UnknownCard {
                line: line_num,
                card: line.to_string(),
            });
        } else {
            let program = current.as_mut().ok_or(LoaderError::OrphanInstruction { line: line_num })?;
            program.instructions.extend(line.split_whitespace().map(str::to_string));
        }
    }

    if let Some(open) = current {
        return Err(LoaderError::MissingEnd(open.id));
    }

    Ok(programs)
}
