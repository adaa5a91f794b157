//! Interactive `Spiral > ` prompt loop.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::session::{Session, SimulateOptions};

const PROMPT: &str = "Spiral > ";
const RECENT_ENTRIES: usize = 5;

const HELP: &str = "\
Available commands:
  expand         :: advance the glyph one step through the spiral
  simulate       :: run the quantum glyph simulation and journal it
  memory         :: show glyph, history, stability and recent journal
  transmit [msg] :: transmit the latest reading
  respond        :: respond to the last transmitted packet
  auto-transmit  :: toggle transmitting every simulation record
  auto-respond   :: toggle automatic responses
  help           :: show this list
  exit           :: leave the runtime";

enum Flow {
    Continue,
    Exit,
}

/// Read commands from `input` until `exit` or EOF. Command failures are
/// reported and the loop keeps going; only output errors end it.
pub fn run(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "🌀 SpiralOS :: symbolic runtime")?;
    writeln!(out, "Type 'help' to see available commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            writeln!(out, "[∅] input closed. Goodbye.")?;
            return Ok(());
        };
        let line = line?;

        match dispatch(session, line.trim(), out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                writeln!(out, "[∅] SpiralOS runtime collapsing... Goodbye.")?;
                return Ok(());
            }
            Err(e) => {
                tracing::error!("command '{}' failed: {e:#}", line.trim());
                writeln!(out, "error: {e:#}")?;
            }
        }
    }
}

fn dispatch(session: &mut Session, line: &str, out: &mut impl Write) -> Result<Flow> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "" => {}
        "help" => writeln!(out, "{HELP}")?,
        "expand" => session.expand(out)?,
        "simulate" => session.simulate(&SimulateOptions::default(), out)?,
        "memory" => session.memory(RECENT_ENTRIES, out)?,
        "transmit" => session.transmit(rest, out)?,
        "respond" => session.respond(out)?,
        "auto-transmit" => session.toggle_auto_transmit(out)?,
        "auto-respond" => session.toggle_auto_respond(out)?,
        "exit" | "quit" => return Ok(Flow::Exit),
        other => writeln!(out, "unknown command '{other}'. Type 'help' for options.")?,
    }
    Ok(Flow::Continue)
}
