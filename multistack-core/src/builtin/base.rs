use std::rc::Rc;

use crate::error::Result;
use crate::shell::{Arity, Builtin, IntType, Reply, Shell, Stacks};

fn show(shell: &mut Shell, _: &[IntType]) -> Result<Reply> {
    Ok(Reply::Text(shell.stacks().to_string()))
}

fn reset(shell: &mut Shell, args: &[IntType]) -> Result<Reply> {
    let stacks = Stacks::from_signed(args[0], args[1])?;
    shell.replace_stacks(stacks);
    Ok(Reply::Unit)
}

fn help(shell: &mut Shell, _: &[IntType]) -> Result<Reply> {
    let mut builtins: Vec<_> = shell.builtins().collect();
    builtins.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Reply::Text(
        builtins
            .iter()
            .map(|b| b.usage.as_str())
            .collect::<Vec<&str>>()
            .join("\n"),
    ))
}

pub fn add_builtins(shell: &mut Shell) {
    let none = Arity::Exactly(0);
    shell.define(Builtin::new("show", "show", none, Rc::new(show)));
    shell.define(Builtin::new(
        "reset",
        "reset NUM SIZE",
        Arity::Exactly(2),
        Rc::new(reset),
    ));
    shell.define(Builtin::new("help", "help", none, Rc::new(help)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn run(shell: &mut Shell, source: &str) -> Result<Vec<Reply>> {
        shell.run_source("test", source)
    }

    #[test]
    fn test_show() {
        let mut shell = Shell::new(2, 2);
        assert_eq!(
            run(&mut shell, "push 1 4; show").unwrap(),
            vec![Reply::Unit, Reply::Text("[_, _, _, 4]".to_string())]
        );
    }

    #[test]
    fn test_reset() {
        let mut shell = Shell::new(2, 2);
        run(&mut shell, "push 0 1; reset 0 5").unwrap();
        assert_eq!(shell.stacks().num(), 3);
        assert_eq!(shell.stacks().size(), 5);
        assert!(shell.stacks().is_empty(0).unwrap());
    }

    #[test]
    fn test_reset_negative_keeps_stacks() {
        let mut shell = Shell::new(2, 2);
        run(&mut shell, "push 0 1").unwrap();
        match run(&mut shell, "reset -1 2") {
            Err(Error::Argument(_)) => (),
            other => panic!("expected argument error, got {:?}", other),
        }
        assert_eq!(shell.stacks().num(), 2);
        assert_eq!(shell.stacks().peek(0).unwrap(), Some(&1));
    }

    #[test]
    fn test_reset_too_big_keeps_stacks() {
        let mut shell = Shell::new(2, 2);
        run(&mut shell, "push 1 8").unwrap();
        match run(&mut shell, "reset 2147483648 2147483648") {
            Err(Error::Argument(_)) => (),
            other => panic!("expected argument error, got {:?}", other),
        }
        assert_eq!(shell.stacks().num(), 2);
        assert_eq!(shell.stacks().peek(1).unwrap(), Some(&8));
    }

    #[test]
    fn test_help_sorted() {
        let mut shell = Shell::default();
        let text = match run(&mut shell, "help").unwrap().pop() {
            Some(Reply::Text(text)) => text,
            other => panic!("expected text, got {:?}", other),
        };
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "empty? STACK",
                "full? STACK",
                "help",
                "len STACK",
                "min STACK",
                "peek STACK",
                "pop STACK",
                "push STACK VALUE...",
                "reset NUM SIZE",
                "show",
            ]
        );
    }
}
