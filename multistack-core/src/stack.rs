use std::convert::TryFrom;
use std::fmt;

use tracing::debug;

use crate::error::{
    ArgumentError, BoundsError, Error, Result, StackEmptyError, StackFullError,
};

/// Number of stacks, and slots per stack, used when a dimension is zero.
pub const DEFAULT_DIMENSION: usize = 3;

/// `num` stacks of `size` slots each, sharing one buffer.
///
/// Stack `s` owns the slots `[s * size, (s + 1) * size)` and grows from the
/// high end of that range toward the low end. Every stack also keeps a
/// sequence of running minima, so `min` never has to scan the stack.
///
/// ```
/// use multistack::stack::MultiStack;
///
/// let mut s = MultiStack::new(4, 4);
/// s.push(1, 35).unwrap();
/// s.push(1, 10).unwrap();
/// s.push(0, 2).unwrap();
/// s.push(2, -33).unwrap();
/// assert_eq!(s.peek(1).unwrap(), Some(&10));
/// assert_eq!(s.pop(2).unwrap(), -33);
/// assert_eq!(
///     s.to_string(),
///     "[_, _, _, 2, _, _, 10, 35, _, _, _, _, _, _, _, _]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStack<T> {
    num: usize,
    size: usize,
    slots: Vec<Option<T>>,
    counts: Vec<usize>,
    // Slot indices of the running minima, innermost minimum last.
    mins: Vec<Vec<usize>>,
}

impl<T: Ord> MultiStack<T> {
    /// Zero for either dimension means `DEFAULT_DIMENSION`.
    ///
    /// Panics if `num * size` overflows `usize`, like any oversized `Vec`.
    pub fn new(num: usize, size: usize) -> Self {
        let num = or_default(num);
        let size = or_default(size);
        Self {
            num,
            size,
            slots: std::iter::repeat_with(|| None).take(num * size).collect(),
            counts: vec![0; num],
            mins: (0..num).map(|_| Vec::new()).collect(),
        }
    }

    /// Like `new`, but reports a shape that cannot be allocated instead of
    /// panicking.
    pub fn try_new(num: usize, size: usize) -> Result<Self> {
        let too_big = || {
            Error::from(ArgumentError::new(format!(
                "{} stacks of size {} do not fit in memory",
                num, size
            )))
        };
        let (num, size) = (or_default(num), or_default(size));
        let len = num.checked_mul(size).ok_or_else(too_big)?;

        let mut slots = Vec::new();
        slots.try_reserve_exact(len).map_err(|_| too_big())?;
        slots.extend(std::iter::repeat_with(|| None).take(len));
        Ok(Self {
            num,
            size,
            slots,
            counts: vec![0; num],
            mins: (0..num).map(|_| Vec::new()).collect(),
        })
    }

    /// Like `try_new`, for dimensions that come from untrusted signed input.
    pub fn from_signed(num: i64, size: i64) -> Result<Self> {
        let num = dimension("number of stacks", num)?;
        let size = dimension("stack size", size)?;
        Self::try_new(num, size)
    }

    pub fn num(&self) -> usize {
        self.num
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The whole backing buffer, in physical order.
    pub fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    pub fn len(&self, stack: usize) -> Result<usize> {
        self.check(stack)?;
        Ok(self.counts[stack])
    }

    pub fn is_empty(&self, stack: usize) -> Result<bool> {
        Ok(self.len(stack)? == 0)
    }

    pub fn is_full(&self, stack: usize) -> Result<bool> {
        Ok(self.len(stack)? >= self.size)
    }

    pub fn peek(&self, stack: usize) -> Result<Option<&T>> {
        if self.is_empty(stack)? {
            return Ok(None);
        }
        Ok(self.slots[self.top_index(stack)?].as_ref())
    }

    pub fn push(&mut self, stack: usize, value: T) -> Result<()> {
        if self.is_full(stack)? {
            return Err(StackFullError::new(stack).into());
        }
        let top = self.top_index(stack)?;
        let index = if self.counts[stack] == 0 { top } else { top - 1 };
        let new_min = match self.current_min(stack) {
            Some(min) => value <= *min,
            None => true,
        };

        self.slots[index] = Some(value);
        if new_min {
            self.mins[stack].push(index);
        }
        self.counts[stack] += 1;
        debug!(stack, index, new_min, "push");
        Ok(())
    }

    pub fn pop(&mut self, stack: usize) -> Result<T> {
        if self.is_empty(stack)? {
            return Err(StackEmptyError::new(stack).into());
        }
        let index = self.top_index(stack)?;
        let value = self.slots[index]
            .take()
            .ok_or_else(|| StackEmptyError::new(stack))?;

        if self.mins[stack].last() == Some(&index) {
            self.mins[stack].pop();
        }
        self.counts[stack] -= 1;
        debug!(stack, index, "pop");
        Ok(value)
    }

    pub fn min(&self, stack: usize) -> Result<Option<&T>> {
        self.check(stack)?;
        Ok(self.current_min(stack))
    }

    fn current_min(&self, stack: usize) -> Option<&T> {
        self.mins[stack]
            .last()
            .and_then(|&index| self.slots[index].as_ref())
    }

    fn top_index(&self, stack: usize) -> Result<usize> {
        self.check(stack)?;
        let offset = match self.counts[stack] {
            0 => self.size - 1,
            count => self.size - count,
        };
        Ok(stack * self.size + offset)
    }

    fn check(&self, stack: usize) -> Result<()> {
        if stack < self.num {
            Ok(())
        } else {
            Err(BoundsError::new(stack, self.num).into())
        }
    }
}

impl<T: Ord> Default for MultiStack<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION, DEFAULT_DIMENSION)
    }
}

impl<T: fmt::Display> fmt::Display for MultiStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.slots
                .iter()
                .map(|slot| match slot {
                    Some(v) => v.to_string(),
                    None => "_".to_string(),
                })
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

fn or_default(n: usize) -> usize {
    if n == 0 {
        DEFAULT_DIMENSION
    } else {
        n
    }
}

fn dimension(what: &str, n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| {
        Error::from(ArgumentError::new(format!(
            "{} must be a non-negative integer, got {}",
            what, n
        )))
    })
}
