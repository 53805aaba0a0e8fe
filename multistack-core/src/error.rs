use std::fmt;

pub use crate::reader::parser::SyntaxError;
pub use crate::reader::tokenizer::LexError;
pub use crate::shell::CommandError;

#[derive(Debug, PartialEq)]
pub enum Error {
    Argument(ArgumentError),
    Bounds(BoundsError),
    Full(StackFullError),
    Empty(StackEmptyError),
    Lex(LexError),
    Syntax(SyntaxError),
    Command(CommandError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Argument(e) => write!(f, "{}", e),
            Self::Bounds(e) => write!(f, "{}", e),
            Self::Full(e) => write!(f, "{}", e),
            Self::Empty(e) => write!(f, "{}", e),
            Self::Lex(e) => write!(f, "{}", e),
            Self::Syntax(e) => write!(f, "{}", e),
            Self::Command(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ArgumentError> for Error {
    fn from(e: ArgumentError) -> Self {
        Self::Argument(e)
    }
}

impl From<BoundsError> for Error {
    fn from(e: BoundsError) -> Self {
        Self::Bounds(e)
    }
}

impl From<StackFullError> for Error {
    fn from(e: StackFullError) -> Self {
        Self::Full(e)
    }
}

impl From<StackEmptyError> for Error {
    fn from(e: StackEmptyError) -> Self {
        Self::Empty(e)
    }
}

impl From<LexError> for Error {
    fn from(le: LexError) -> Self {
        Self::Lex(le)
    }
}

impl From<SyntaxError> for Error {
    fn from(se: SyntaxError) -> Self {
        Self::Syntax(se)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

#[derive(Debug, PartialEq)]
pub struct ArgumentError {
    reason: String,
}

impl ArgumentError {
    pub fn new(reason: String) -> Self {
        Self { reason }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ArgumentError: {}", self.reason)
    }
}

/// A stack index outside `[0, num)`.
#[derive(Debug, PartialEq)]
pub struct BoundsError {
    pub stack: usize,
    pub num: usize,
}

impl BoundsError {
    pub fn new(stack: usize, num: usize) -> Self {
        Self { stack, num }
    }
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "BoundsError: stack {} out of range, there are {} stacks",
            self.stack, self.num
        )
    }
}

#[derive(Debug, PartialEq)]
pub struct StackFullError {
    pub stack: usize,
}

impl StackFullError {
    pub fn new(stack: usize) -> Self {
        Self { stack }
    }
}

impl fmt::Display for StackFullError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StackFullError: stack {} is full", self.stack)
    }
}

#[derive(Debug, PartialEq)]
pub struct StackEmptyError {
    pub stack: usize,
}

impl StackEmptyError {
    pub fn new(stack: usize) -> Self {
        Self { stack }
    }
}

impl fmt::Display for StackEmptyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StackEmptyError: stack {} is empty", self.stack)
    }
}
