use std::rc::Rc;

use crate::builtin::stack_index;
use crate::error::{Result, StackFullError};
use crate::shell::{Arity, Builtin, IntType, Reply, Shell};

fn push(shell: &mut Shell, args: &[IntType]) -> Result<Reply> {
    let stack = stack_index(args[0])?;
    let values = &args[1..];
    let stacks = shell.stacks_mut();
    // all or nothing: refuse the whole batch if it would overflow
    if stacks.len(stack)? + values.len() > stacks.size() {
        return Err(StackFullError::new(stack).into());
    }
    for &value in values {
        stacks.push(stack, value)?;
    }
    Ok(Reply::Unit)
}

fn pop(shell: &mut Shell, args: &[IntType]) -> Result<Reply> {
    let stack = stack_index(args[0])?;
    Ok(Reply::Int(shell.stacks_mut().pop(stack)?))
}

fn peek(shell: &mut Shell, args: &[IntType]) -> Result<Reply> {
    let stack = stack_index(args[0])?;
    Ok(shell.stacks().peek(stack)?.into())
}

fn min(shell: &mut Shell, args: &[IntType]) -> Result<Reply> {
    let stack = stack_index(args[0])?;
    Ok(shell.stacks().min(stack)?.into())
}

fn len(shell: &mut Shell, args: &[IntType]) -> Result<Reply> {
    let stack = stack_index(args[0])?;
    Ok(Reply::Int(shell.stacks().len(stack)? as IntType))
}

fn is_empty(shell: &mut Shell, args: &[IntType]) -> Result<Reply> {
    let stack = stack_index(args[0])?;
    Ok(Reply::Bool(shell.stacks().is_empty(stack)?))
}

fn is_full(shell: &mut Shell, args: &[IntType]) -> Result<Reply> {
    let stack = stack_index(args[0])?;
    Ok(Reply::Bool(shell.stacks().is_full(stack)?))
}

pub fn add_builtins(shell: &mut Shell) {
    let one = Arity::Exactly(1);
    shell.define(Builtin::new(
        "push",
        "push STACK VALUE...",
        Arity::AtLeast(2),
        Rc::new(push),
    ));
    shell.define(Builtin::new("pop", "pop STACK", one, Rc::new(pop)));
    shell.define(Builtin::new("peek", "peek STACK", one, Rc::new(peek)));
    shell.define(Builtin::new("min", "min STACK", one, Rc::new(min)));
    shell.define(Builtin::new("len", "len STACK", one, Rc::new(len)));
    shell.define(Builtin::new("empty?", "empty? STACK", one, Rc::new(is_empty)));
    shell.define(Builtin::new("full?", "full? STACK", one, Rc::new(is_full)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoundsError, Error, StackEmptyError};

    fn run(shell: &mut Shell, source: &str) -> Result<Vec<Reply>> {
        shell.run_source("test", source)
    }

    fn last(shell: &mut Shell, source: &str) -> Reply {
        run(shell, source).unwrap().pop().unwrap()
    }

    #[test]
    fn test_scenario_script() {
        let mut shell = Shell::new(4, 4);
        let replies = run(
            &mut shell,
            "push 1 35\npush 1 10\npush 0 2\npush 2 -33\npeek 1\npop 2\n",
        )
        .unwrap();
        assert_eq!(
            replies,
            vec![
                Reply::Unit,
                Reply::Unit,
                Reply::Unit,
                Reply::Unit,
                Reply::Int(10),
                Reply::Int(-33),
            ]
        );
        assert_eq!(
            shell.stacks().to_string(),
            "[_, _, _, 2, _, _, 10, 35, _, _, _, _, _, _, _, _]"
        );
    }

    #[test]
    fn test_push_many() {
        let mut shell = Shell::new(2, 3);
        assert_eq!(last(&mut shell, "push 0 5 3 7; min 0"), Reply::Int(3));
        assert_eq!(last(&mut shell, "len 0"), Reply::Int(3));
        assert_eq!(last(&mut shell, "full? 0"), Reply::Bool(true));
        assert_eq!(last(&mut shell, "pop 0"), Reply::Int(7));
    }

    #[test]
    fn test_push_many_all_or_nothing() {
        let mut shell = Shell::new(2, 3);
        run(&mut shell, "push 1 1").unwrap();
        assert_eq!(
            run(&mut shell, "push 1 2 3 4"),
            Err(Error::from(StackFullError::new(1)))
        );
        assert_eq!(last(&mut shell, "len 1"), Reply::Int(1));
        assert_eq!(last(&mut shell, "peek 1"), Reply::Int(1));
    }

    #[test]
    fn test_empty_stack_replies() {
        let mut shell = Shell::new(2, 2);
        assert_eq!(last(&mut shell, "peek 0"), Reply::Nothing);
        assert_eq!(last(&mut shell, "min 0"), Reply::Nothing);
        assert_eq!(last(&mut shell, "empty? 0"), Reply::Bool(true));
        assert_eq!(last(&mut shell, "full? 0"), Reply::Bool(false));
        assert_eq!(
            run(&mut shell, "pop 0"),
            Err(Error::from(StackEmptyError::new(0)))
        );
    }

    #[test]
    fn test_bad_stack_index() {
        let mut shell = Shell::new(2, 2);
        assert_eq!(
            run(&mut shell, "peek 2"),
            Err(Error::from(BoundsError::new(2, 2)))
        );
        match run(&mut shell, "push -1 4") {
            Err(Error::Argument(e)) => assert_eq!(
                e.to_string(),
                "ArgumentError: stack index must be non-negative, got -1"
            ),
            other => panic!("expected argument error, got {:?}", other),
        }
        assert!(shell.stacks().slots().iter().all(Option::is_none));
    }
}
