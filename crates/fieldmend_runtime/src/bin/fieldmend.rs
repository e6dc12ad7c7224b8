//! Fieldmend CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use fieldmend_runtime::{loader, Repl, Session};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    data: Option<PathBuf>,
    history: Option<PathBuf>,
    swaps: Option<PathBuf>,
    out: Option<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--swaps" => {
                i += 1;
                if i >= args.len() {
                    return Err("--swaps requires a file".into());
                }
                config.swaps = Some(PathBuf::from(&args[i]));
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    return Err("--out requires a file".into());
                }
                config.out = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path if config.data.is_none() => config.data = Some(PathBuf::from(path)),
            path if config.history.is_none() => config.history = Some(PathBuf::from(path)),
            path => {
                return Err(format!("unexpected argument: {path}").into());
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("fieldmend {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut session = Session::new();

    if let Some(data) = &config.data {
        let rows = session.load_dataset(data)?;
        eprintln!("Loaded {rows} records from {}", data.display());
    }
    if let Some(history) = &config.history {
        let events = session.load_events(history)?;
        eprintln!("Loaded {events} history events from {}", history.display());
    }

    if config.batch_mode {
        return run_batch(session, &config);
    }

    let mut repl = Repl::new()?.with_session(session);
    if config.data.is_some() {
        repl = repl.without_banner();
    }
    repl.run()?;
    Ok(())
}

/// Applies a swap-pair file non-interactively and writes the result.
fn run_batch(mut session: Session, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.data.is_none() {
        return Err("batch mode requires a DATA.csv argument".into());
    }
    let Some(swaps) = &config.swaps else {
        return Err("batch mode requires --swaps FILE".into());
    };
    let Some(out) = &config.out else {
        return Err("batch mode requires --out FILE".into());
    };

    let pairs = loader::load_swap_pairs(swaps)?;
    let outcome = session.apply_swap_pairs(&pairs);

    for (id, summary) in &outcome.applied {
        println!("{}: {summary}", id.as_str());
    }
    for (id, error) in &outcome.failed {
        eprintln!("\x1b[31m{}: {error}\x1b[0m", id.as_str());
    }
    eprintln!(
        "{} changed, {} failed",
        outcome.applied.len(),
        outcome.failed.len()
    );

    session.save_csv(out)?;
    eprintln!("Wrote {}", out.display());

    if outcome.is_clean() {
        Ok(())
    } else {
        Err("one or more records failed".into())
    }
}

fn print_help() {
    println!(
        "\x1b[1mFieldmend\x1b[0m - Field reference consistency for tracker exports

\x1b[1mUSAGE:\x1b[0m
    fieldmend [OPTIONS] [DATA.csv [HISTORY.csv]]

\x1b[1mARGUMENTS:\x1b[0m
    DATA.csv       Tracker export to load before starting
    HISTORY.csv    Field history log for restore commands

\x1b[1mOPTIONS:\x1b[0m
    -h, --help       Print help information
    -V, --version    Print version information
    -b, --batch      Apply --swaps and exit (no REPL)
    --swaps FILE     CSV of OldFieldAPI,NewFieldAPI pairs to apply
    --out FILE       Where batch mode writes the edited dataset

\x1b[1mEXAMPLES:\x1b[0m
    fieldmend                                  Start interactive session
    fieldmend export.csv history.csv           Load data, then start session
    fieldmend -b export.csv --swaps renames.csv --out fixed.csv

\x1b[1mCOMMANDS:\x1b[0m
    Type 'help' inside the session for the command list.
    Ctrl+D exits."
    );
}
