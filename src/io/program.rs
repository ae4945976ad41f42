/// A program image as read from the program file: the process id and its
/// instruction tokens, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub id: u32,
    pub instructions: Vec<String>,
}

impl Program {
    pub fn new<I, T>(id: u32, instructions: I) -> Program
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Program {
            id,
            instructions: instructions.into_iter().map(Into::into).collect(),
        }
    }
}
