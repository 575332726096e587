use std::io::{self, BufRead, Write};

use crate::commands::Session;
use crate::responses;

const SEPARATOR: &str = "____________________________________________________________";

/// Reads commands from `input` until `bye` or end of input, writing each
/// response to `output` between separator lines.
pub fn run_repl<R: BufRead, W: Write>(
    session: &mut Session,
    bot_name: &str,
    input: R,
    mut output: W,
) -> io::Result<()> {
    print_block(&mut output, &responses::welcome(bot_name))?;
    if let Some(err) = session.take_load_error() {
        print_block(&mut output, &err)?;
    }

    for line in input.lines() {
        let line = line?;
        let response = session.handle(&line);
        print_block(&mut output, &response.message)?;
        if response.is_exit() {
            return Ok(());
        }
    }
    log::info!("Input closed without bye");
    Ok(())
}

fn print_block<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{SEPARATOR}")?;
    for line in message.lines() {
        writeln!(out, " {line}")?;
    }
    writeln!(out, "{SEPARATOR}")?;
    out.flush()
}
