use std::fmt;

use crate::error::Result;
use crate::reader::PositionTag;
use crate::reader::Token;
use crate::reader::TokenProducer;
use crate::reader::TokenValue;
use crate::shell::IntType;

/// One command invocation: a name followed by integer arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub name: String,
    pub args: Vec<IntType>,
    pub pos: PositionTag,
}

impl Statement {
    pub fn new(name: &str, args: Vec<IntType>, pos: PositionTag) -> Self {
        Self {
            name: name.to_string(),
            args,
            pos,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

pub struct Parser {
    tokens: Box<dyn TokenProducer>,
    peek: Token,
}

impl Parser {
    pub fn new(tokens: Box<dyn TokenProducer>) -> Result<Self> {
        let mut this = Self {
            tokens,
            // Dummy value until we read the first real token
            peek: Token::new(TokenValue::None, PositionTag::new("", 0, 0)),
        };
        this.next()?;
        Ok(this)
    }

    fn error(&self, pos: PositionTag, reason: &str) -> SyntaxError {
        SyntaxError::new(pos, reason.to_string())
    }

    fn next(&mut self) -> Result<Token> {
        let next = self.tokens.next_token()?;
        let cur = std::mem::replace(&mut self.peek, next);
        Ok(cur)
    }

    fn at_terminator(&self) -> bool {
        matches!(
            self.peek.value,
            TokenValue::Newline | TokenValue::Char(';') | TokenValue::Eof
        )
    }

    fn skip_terminators(&mut self) -> Result<()> {
        while matches!(
            self.peek.value,
            TokenValue::Newline | TokenValue::Char(';')
        ) {
            self.next()?;
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<Statement> {
        let head = self.next()?;
        let name = match head.value {
            TokenValue::Ident(name) => name,
            other => {
                return Err(self
                    .error(head.pos, &format!("expected command name, got {}", other))
                    .into())
            }
        };
        let mut args = vec![];
        while !self.at_terminator() {
            let next = self.next()?;
            match next.value {
                TokenValue::Int(n) => args.push(n),
                other => {
                    return Err(self
                        .error(
                            next.pos,
                            &format!("expected integer argument, got {}", other),
                        )
                        .into())
                }
            }
        }
        Ok(Statement {
            name,
            args,
            pos: head.pos,
        })
    }

    pub fn parse(&mut self) -> Result<Option<Statement>> {
        self.skip_terminators()?;
        if self.peek.value == TokenValue::Eof {
            return Ok(None);
        }
        self.statement().map(Some)
    }
}

impl Iterator for Parser {
    type Item = Result<Statement>;
    fn next(&mut self) -> Option<<Self as Iterator>::Item> {
        self.parse().transpose()
    }
}

#[derive(Debug, PartialEq)]
pub struct SyntaxError {
    pub pos: PositionTag,
    pub reason: String,
}

impl SyntaxError {
    pub fn new(pos: PositionTag, reason: String) -> Self {
        Self { pos, reason }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        write!(f, "SyntaxError: {} at {}", self.reason, self.pos)
    }
}
