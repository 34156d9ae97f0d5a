use clap::Parser;
use log::{debug, info, LevelFilter};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anagrammary::letter_pool::{Command, LetterPool, PoolMode, SAMPLE_COMMANDS};

/// Play letters out of a pool of tiles while hunting for an anagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pool of letters; `_` is a blank
    letters: String,

    /// Record letters that are not in the pool instead of ignoring them
    #[arg(long)]
    lenient: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    anagrammary::log::init_logger(cli.log_level);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    let mode = if cli.lenient { PoolMode::Lenient } else { PoolMode::Strict };
    let mut pool = LetterPool::build(&cli.letters).with_mode(mode);
    let mut rng = rand::rng();
    let mut previous: Option<Command> = None;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout().lock();

    loop {
        debug!("pool: {:?} (blanks = {})", pool.letters(), pool.blanks());
        writeln!(stdout, "pool: {}", pool.render())?;
        if !pool.used().is_empty() {
            writeln!(stdout, "state: {}", pool.used().iter().collect::<String>())?;
        }
        writeln!(stdout)?;
        write!(stdout, "consume: ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            // end of input
            writeln!(stdout)?;
            break;
        };
        writeln!(stdout)?;

        let command = Command::parse(&line?).or_previous(previous.as_ref());

        match &command {
            Command::Exit => break,
            Command::Reset => pool.reset(),
            Command::Shuffle(None) => pool.shuffle(&mut rng),
            Command::Shuffle(Some(n)) => {
                let variants = pool.shuffled_variants(*n, &mut rng);
                for variant in &variants {
                    writeln!(stdout, "{variant}")?;
                }
                if variants.len() < *n {
                    info!("more shuffles requested ({n}) than available ({})", variants.len());
                }
                writeln!(stdout)?;
            }
            Command::Alphabetize => pool.alphabetize(),
            Command::Blank => eprintln!("using blanks directly is not supported"),
            Command::Consume(letters) => {
                pool.consume(letters);
            }
            Command::Unrecognized(cmd) => eprintln!("command not recognized: {cmd}"),
            Command::BadParameter { command, param } => eprintln!("{command}: expected a number, got '{param}'"),
            Command::Empty | Command::Last => {
                eprintln!("enter letters or a command ({})", SAMPLE_COMMANDS.join(", "));
                continue;
            }
        }
        previous = Some(command);
    }

    Ok(())
}
