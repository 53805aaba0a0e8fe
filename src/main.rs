use std::path::PathBuf;

use home::home_dir;
use lazy_static::lazy_static;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use structopt::StructOpt;
use tracing::{debug, info, Level};

use multistack::error::Error;
use multistack::shell::{Reply, Shell};

const VERSION: &str = env!("CARGO_PKG_VERSION");

lazy_static! {
    static ref HISTORY_FILE: PathBuf = match home_dir() {
        Some(mut p) => {
            p.push(".multistack_history");
            p
        }
        None => {
            eprintln!("could not locate home dir, saving history to current dir");
            PathBuf::from(".multistack_history")
        }
    };
}

/// Push, pop and inspect a fixed array of stacks.
#[derive(StructOpt, Debug)]
#[structopt(name = "multistack")]
struct Opt {
    /// Scripts to run before (or instead of) the interactive prompt
    #[structopt(parse(from_os_str))]
    files: Vec<PathBuf>,
    /// Enter the prompt even after running scripts
    #[structopt(short, long)]
    interactive: bool,
    /// Number of stacks, 0 for the default
    #[structopt(short, long, default_value = "3")]
    num: usize,
    /// Slots per stack, 0 for the default
    #[structopt(short, long, default_value = "3")]
    size: usize,
    /// Log more, repeat for even more
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let Opt {
        files,
        interactive,
        num,
        size,
        verbose,
    } = Opt::from_args();
    init_logging(verbose);

    let mut shell = match Shell::try_new(num, size) {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        num = shell.stacks().num(),
        size = shell.stacks().size(),
        "stacks ready"
    );

    for file in &files {
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                std::process::exit(1);
            }
        };
        debug!(file = %file.display(), "running script");
        if let Err(e) = run(&mut shell, &file.to_string_lossy(), &source) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    if interactive || files.is_empty() {
        repl(&mut shell);
    }
}

/// Runs statements one at a time, printing replies as they come.
fn run(shell: &mut Shell, filename: &str, source: &str) -> Result<(), String> {
    let statements = shell
        .statements(filename, source)
        .map_err(|e| e.to_string())?;
    for stmt in statements {
        let stmt = stmt.map_err(|e| e.to_string())?;
        match shell.execute(&stmt) {
            Ok(Reply::Unit) => (),
            Ok(reply) => println!("{}", reply),
            Err(Error::Command(e)) => return Err(e.to_string()),
            Err(e) => return Err(format!("{} in `{}` at {}", e, stmt, stmt.pos)),
        }
    }
    Ok(())
}

fn repl(shell: &mut Shell) {
    println!(
        "multistack v{}: {} stacks of {}, type help for commands",
        VERSION,
        shell.stacks().num(),
        shell.stacks().size()
    );
    let mut rl = Editor::<()>::new();
    let _ = rl.load_history(&*HISTORY_FILE);

    loop {
        let input = match rl.readline(">>> ") {
            Ok(input) => input,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };
        rl.add_history_entry(input.as_str());
        if let Err(e) = rl.save_history(&*HISTORY_FILE) {
            eprintln!("Error saving history file: {}", e)
        }
        if let Err(e) = run(shell, "#STDIN", &input) {
            eprintln!("{}", e);
        }
    }
}
