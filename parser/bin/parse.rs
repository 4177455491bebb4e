extern crate ippcode23_parser;

use std::io::{self, Read};
use std::process;

use annotate_snippets::display_list::DisplayList;
use clap::{crate_version, App, Arg, ErrorKind as ClapErrorKind};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ippcode23_parser::{parse, Error, LeniencyLevel};

const BAD_PARAMETER_EXIT_CODE: i32 = 10;
const ORIGIN: &str = "<stdin>";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let matches = App::new("parse_ippcode23")
        .version(crate_version!())
        .about("Reads IPPcode23 source from standard input and writes its XML representation to standard output.")
        .arg(Arg::with_name("lenient")
            .long("lenient")
            .help("Also accept the legacy .IPPcode22 header"))
        .arg(Arg::with_name("name")
            .long("name")
            .takes_value(true)
            .value_name("NAME")
            .help("Program name to record on the root element"))
        .arg(Arg::with_name("description")
            .long("description")
            .takes_value(true)
            .value_name("TEXT")
            .help("Program description to record on the root element"))
        .get_matches_safe()
        .unwrap_or_else(|e| match e.kind {
            ClapErrorKind::HelpDisplayed | ClapErrorKind::VersionDisplayed => e.exit(),
            _ => {
                eprintln!("{}", e.message);
                process::exit(BAD_PARAMETER_EXIT_CODE);
            }
        });

    let leniency = if matches.is_present("lenient") {
        LeniencyLevel::Lenient
    } else {
        LeniencyLevel::Strict
    };

    let result = read_stdin().and_then(|src| {
        let mut program = parse(&src, leniency)?;
        if let Some(name) = matches.value_of("name") {
            program = program.with_name(name);
        }
        if let Some(description) = matches.value_of("description") {
            program = program.with_description(description);
        }
        debug!(instructions = program.instructions.len(), "writing document");
        let stdout = io::stdout();
        program.write_xml(stdout.lock())
    });

    if let Err(e) = result {
        report(&e);
        process::exit(e.kind().exit_code());
    }
}

fn read_stdin() -> Result<String, Error> {
    let mut src = String::new();
    io::stdin().read_to_string(&mut src).map_err(Error::Input)?;
    Ok(src)
}

fn report(e: &Error) {
    debug!(kind = ?e.kind(), exit_code = e.kind().exit_code(), "aborting");
    let message = e.to_string();
    let snippet = e.create_snippet(&message, Some(ORIGIN), use_color());
    eprintln!("{}", DisplayList::from(snippet));
}

// NO_COLOR and dumb terminals get plain output.
fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::env::var_os("TERM").map_or(false, |term| term != "dumb")
}
