use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::reader::PositionTag;
use crate::shell::IntType;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenValue {
    None,
    Char(char),
    Int(IntType),
    Ident(String),
    Newline,
    Eof,
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenValue::*;
        match &self {
            Eof => write!(f, "#EOF"),
            None => write!(f, "#NONE"),
            Newline => write!(f, "#NEWLINE"),
            Int(n) => write!(f, "Int({})", n),
            Ident(s) => write!(f, "Ident({})", s),
            Char(c) => write!(f, "Char('{}')", c),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub value: TokenValue,
    pub pos: PositionTag,
}

impl Token {
    pub fn new(value: TokenValue, pos: PositionTag) -> Self {
        Self { value, pos }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Token) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "token {} at {}", self.value, self.pos)
    }
}

lazy_static! {
    static ref RE_WS: Regex = Regex::new(r"^[ \t\r]+").unwrap();
    static ref RE_COMMENT: Regex = Regex::new(r"^#[^\n]*").unwrap();
    static ref RE_NEWLINE: Regex = Regex::new(r"^\n").unwrap();
    static ref RE_INT: Regex = Regex::new(r"^-?[0-9]+").unwrap();
    static ref RE_IDENT: Regex = Regex::new(r"^[a-zA-Z][0-9a-zA-Z_?!-]*").unwrap();
    static ref RE_SEPARATOR: Regex = Regex::new(r"^;").unwrap();
}

type TResult = std::result::Result<TokenValue, String>;

fn t_int(val: &str) -> TResult {
    match val.parse::<IntType>() {
        Ok(n) => Ok(TokenValue::Int(n)),
        Err(e) => Err(format!("int error: {}", e)),
    }
}

fn t_ident(val: &str) -> TResult {
    Ok(TokenValue::Ident(val.to_string()))
}

fn t_newline(_: &str) -> TResult {
    Ok(TokenValue::Newline)
}

fn t_separator(_: &str) -> TResult {
    Ok(TokenValue::Char(';'))
}

pub struct Tokenizer {
    filename: String,
    input: String,
    pos: usize,
    lineno: usize,
    line_start: usize,
}

impl Tokenizer {
    pub fn new(filename: String, input: String) -> Self {
        Self {
            filename,
            input,
            pos: 0,
            lineno: 1,
            line_start: 0,
        }
    }
    fn ptag(&self, pos: usize) -> PositionTag {
        PositionTag {
            filename: self.filename.clone(),
            lineno: self.lineno,
            col: pos - self.line_start + 1,
        }
    }

    fn eat(&mut self, re: &Regex) -> bool {
        match re.find(&self.input[self.pos..]) {
            Some(mat) => {
                self.pos += mat.end();
                true
            }
            None => false,
        }
    }

    fn try_token<T>(&mut self, re: &Regex, cons: T) -> Result<Option<Token>, LexError>
    where
        T: Fn(&str) -> TResult,
    {
        match re.find(&self.input[self.pos..]) {
            Some(mat) => {
                let spos = self.pos;
                self.pos += mat.end();
                match cons(mat.as_str()) {
                    Ok(tokval) => Ok(Some(Token::new(tokval, self.ptag(spos)))),
                    Err(reason) => Err(LexError::new(reason, self.ptag(spos))),
                }
            }
            None => Ok(None),
        }
    }
}

pub trait TokenProducer {
    fn next_token(&mut self) -> Result<Token, LexError>;
}

pub struct TokenIterator<'a, T: TokenProducer + ?Sized> {
    tokeniter: &'a mut T,
}

impl<'a, T: TokenProducer> Iterator for TokenIterator<'a, T> {
    type Item = Result<Token, LexError>;
    fn next(&mut self) -> Option<Result<Token, LexError>> {
        match self.tokeniter.next_token() {
            Ok(tok) => match tok.value {
                TokenValue::Eof => None,
                _ => Some(Ok(tok)),
            },
            Err(e) => Some(Err(e)),
        }
    }
}

pub trait TokenToIter {
    fn to_iter(&mut self) -> TokenIterator<'_, Self>
    where
        Self: TokenProducer;
}

impl<T: TokenProducer> TokenToIter for T {
    fn to_iter(&mut self) -> TokenIterator<'_, Self> {
        TokenIterator { tokeniter: self }
    }
}

impl TokenProducer for Tokenizer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        while self.eat(&RE_WS) || self.eat(&RE_COMMENT) {}

        if self.pos >= self.input.len() {
            return Ok(Token::new(TokenValue::Eof, self.ptag(self.pos)));
        }
        if let Some(token) = self.try_token(&RE_NEWLINE, t_newline)? {
            self.lineno += 1;
            self.line_start = self.pos;
            return Ok(token);
        }
        if let Some(token) = self.try_token(&RE_INT, t_int)? {
            return Ok(token);
        }
        if let Some(token) = self.try_token(&RE_IDENT, t_ident)? {
            return Ok(token);
        }
        if let Some(token) = self.try_token(&RE_SEPARATOR, t_separator)? {
            return Ok(token);
        }
        let unexpected = self.input[self.pos..].chars().next().unwrap_or_default();
        Err(LexError::new(
            format!("unexpected character {:?}", unexpected),
            self.ptag(self.pos),
        ))
    }
}

#[derive(Debug, PartialEq)]
pub struct LexError {
    pub pos: PositionTag,
    pub reason: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "LexError: {} at {}", self.reason, self.pos)
    }
}

impl LexError {
    pub fn new(reason: String, pos: PositionTag) -> Self {
        Self { pos, reason }
    }
}
