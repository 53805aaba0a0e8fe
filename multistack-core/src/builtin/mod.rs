use std::convert::TryFrom;

use crate::error::{ArgumentError, Error, Result};
use crate::shell::{IntType, Shell};

mod base;
mod stack;

pub fn add_builtins(shell: &mut Shell) {
    stack::add_builtins(shell);
    base::add_builtins(shell);
}

/// Stack indices arrive as signed integers from the reader.
fn stack_index(arg: IntType) -> Result<usize> {
    usize::try_from(arg).map_err(|_| {
        Error::from(ArgumentError::new(format!(
            "stack index must be non-negative, got {}",
            arg
        )))
    })
}
