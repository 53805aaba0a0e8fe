use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use tracing::trace;

use crate::builtin::add_builtins;
use crate::error::Result;
use crate::reader::{Parser, PositionTag, Statement, Tokenizer};
use crate::stack::MultiStack;

pub type IntType = i64;
pub type Stacks = MultiStack<IntType>;

/// What a command hands back to whoever is driving the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Unit,
    Nothing,
    Int(IntType),
    Bool(bool),
    Text(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unit => Ok(()),
            Self::Nothing => write!(f, "none"),
            Self::Int(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<Option<&IntType>> for Reply {
    fn from(value: Option<&IntType>) -> Self {
        match value {
            Some(n) => Self::Int(*n),
            None => Self::Nothing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, argc: usize) -> bool {
        match self {
            Self::Exactly(n) => argc == *n,
            Self::AtLeast(n) => argc >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Exactly(1) => write!(f, "exactly 1 argument"),
            Self::Exactly(n) => write!(f, "exactly {} arguments", n),
            Self::AtLeast(n) => write!(f, "at least {} arguments", n),
        }
    }
}

pub type BuiltinFn = Rc<dyn Fn(&mut Shell, &[IntType]) -> Result<Reply>>;

#[derive(Clone)]
pub struct Builtin {
    pub name: String,
    pub usage: String,
    pub arity: Arity,
    pub f: BuiltinFn,
}

impl Builtin {
    pub fn new(name: &str, usage: &str, arity: Arity, f: BuiltinFn) -> Self {
        Self {
            name: name.to_string(),
            usage: usage.to_string(),
            arity,
            f,
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

/// Runs statements against one set of stacks.
pub struct Shell {
    stacks: Stacks,
    builtins: HashMap<String, Builtin>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Shell {
    /// A shell with every builtin command defined.
    pub fn new(num: usize, size: usize) -> Self {
        let mut shell = Self::with_stacks(MultiStack::new(num, size));
        add_builtins(&mut shell);
        shell
    }
    /// Like `new`, but reports a shape too big to allocate.
    pub fn try_new(num: usize, size: usize) -> Result<Self> {
        let mut shell = Self::with_stacks(MultiStack::try_new(num, size)?);
        add_builtins(&mut shell);
        Ok(shell)
    }
    /// A shell with no commands at all.
    pub fn with_stacks(stacks: Stacks) -> Self {
        Self {
            stacks,
            builtins: HashMap::new(),
        }
    }
    pub fn define(&mut self, builtin: Builtin) {
        self.builtins.insert(builtin.name.clone(), builtin);
    }
    pub fn builtins(&self) -> impl Iterator<Item = &Builtin> {
        self.builtins.values()
    }
    pub fn stacks(&self) -> &Stacks {
        &self.stacks
    }
    pub fn stacks_mut(&mut self) -> &mut Stacks {
        &mut self.stacks
    }
    pub fn replace_stacks(&mut self, stacks: Stacks) -> Stacks {
        std::mem::replace(&mut self.stacks, stacks)
    }
    pub fn execute(&mut self, stmt: &Statement) -> Result<Reply> {
        trace!(statement = %stmt, "execute");
        let (arity, f) = match self.builtins.get(&stmt.name) {
            Some(builtin) => (builtin.arity, Rc::clone(&builtin.f)),
            None => return Err(CommandError::unknown(stmt).into()),
        };
        if !arity.accepts(stmt.args.len()) {
            return Err(CommandError::arity(stmt, arity).into());
        }
        f(self, &stmt.args)
    }
    /// Parses `source` into statements without running them.
    pub fn statements(&self, filename: &str, source: &str) -> Result<Parser> {
        Parser::new(Box::new(Tokenizer::new(
            filename.to_string(),
            source.to_string(),
        )))
    }
    /// Runs every statement of `source`, stopping at the first error.
    pub fn run_source(&mut self, filename: &str, source: &str) -> Result<Vec<Reply>> {
        let mut replies = vec![];
        for stmt in self.statements(filename, source)? {
            replies.push(self.execute(&stmt?)?);
        }
        Ok(replies)
    }
}

#[derive(Debug, PartialEq)]
pub struct CommandError {
    pub pos: PositionTag,
    pub reason: String,
}

impl CommandError {
    pub fn new(pos: PositionTag, reason: String) -> Self {
        Self { pos, reason }
    }
    fn unknown(stmt: &Statement) -> Self {
        Self::new(stmt.pos.clone(), format!("unknown command {}", stmt.name))
    }
    fn arity(stmt: &Statement, arity: Arity) -> Self {
        Self::new(
            stmt.pos.clone(),
            format!("{} takes {}, got {}", stmt.name, arity, stmt.args.len()),
        )
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CommandError: {} at {}", self.reason, self.pos)
    }
}
