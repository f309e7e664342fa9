mod args;

use args::Args;
use clap::Parser;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use log::debug;
use minisql::context::Context;
use minisql::data::CsvTableSource;
use minisql::{render_result, run_query, Error};
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(error) = run(args) {
        eprintln!("{} {error}", "Error:".red());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let source = CsvTableSource::new(data_dir(&args)?);

    match &args.query {
        Some(query) => run_once(query, &source),
        None => prompt_loop(&source),
    }
}

/// `--data-dir` wins and becomes the new default; otherwise the stored
/// context, falling back to the current directory.
fn data_dir(args: &Args) -> Result<PathBuf, Error> {
    match &args.data_dir {
        Some(data_dir) => {
            Context {
                data_dir: data_dir.clone(),
            }
            .store()?;

            Ok(data_dir.clone())
        }
        None => match Context::load()? {
            Some(context) => {
                debug!("using saved data directory {}", context.data_dir.display());

                Ok(context.data_dir)
            }
            None => Ok(PathBuf::from(".")),
        },
    }
}

fn run_once(query: &str, source: &CsvTableSource) -> Result<(), Error> {
    let result = run_query(query, source)?;
    print!("{}", render_result(&result));

    Ok(())
}

/// Reads queries until EXIT/QUIT or end of input. A failing query prints
/// its error and the loop moves on to the next one.
fn prompt_loop(source: &CsvTableSource) -> Result<(), Error> {
    println!(
        "mini-SQL prompt. {}/{} combine filters, type {} or {} to leave.",
        "AND".bold(),
        "OR".bold(),
        "EXIT".bold(),
        "QUIT".bold(),
    );

    loop {
        let line: String = match Input::with_theme(&ColorfulTheme::default())
            .with_prompt("sql")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            // End of piped input shows up as an IO error; leave quietly.
            Err(dialoguer::Error::IO(io_error))
                if io_error.kind() == IoErrorKind::UnexpectedEof =>
            {
                println!("Goodbye.");
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            println!("Bye.");
            return Ok(());
        }

        match run_query(line, source) {
            Ok(result) => print!("{}", render_result(&result)),
            Err(error) => eprintln!("{} {error}", "Error:".red()),
        }
    }
}
