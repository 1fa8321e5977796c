//! Line-oriented chat loop.

use std::io::{BufRead, ErrorKind, Write};

use crate::chat::ChatAgent;
use crate::error::{ColloqError, Result};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "salir"];

/// Run an interactive conversation until an exit word or end of input.
///
/// Gateway failures are printed in place of the reply and the loop goes on.
pub async fn run<R: BufRead, W: Write>(
    agent: &mut ChatAgent,
    mut input: R,
    output: &mut W,
) -> Result<()> {
    write_banner(agent, output)?;

    loop {
        write!(output, "You: ")?;
        output.flush()?;

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                writeln!(output)?;
                break;
            }
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                writeln!(output, "Could not read that line as UTF-8 text, please try again.")?;
                continue;
            }
            Err(err) => return Err(err.into()),
        }
        let line = line.trim();

        if EXIT_WORDS.contains(&line.to_lowercase().as_str()) {
            writeln!(output, "Goodbye!")?;
            break;
        }

        match line {
            "" => writeln!(output, "Please type something, or 'exit' to quit.")?,
            "/reset" => {
                agent.reset();
                writeln!(output, "Conversation cleared.")?;
            }
            "/history" => write_history(agent, output)?,
            "/stats" => write_stats(agent, output)?,
            text => reply(agent, text, output).await?,
        }
    }

    Ok(())
}

/// Send one message and print the reply (or the failure) once.
pub async fn reply<W: Write>(agent: &mut ChatAgent, text: &str, output: &mut W) -> Result<()> {
    let name = agent.session().name().to_string();
    match agent.send(text).await {
        Ok(turn) => writeln!(output, "{name}: {}\n", turn.content())?,
        Err(ColloqError::Gateway(err)) => writeln!(output, "{name}: Error: {err}\n")?,
        Err(err) => return Err(err),
    }
    Ok(())
}

fn write_banner<W: Write>(agent: &ChatAgent, output: &mut W) -> Result<()> {
    let session = agent.session();
    writeln!(output, "=== {} ===", session.name())?;
    writeln!(output, "Model: {}", session.model())?;
    writeln!(output, "Temperature: {}", session.temperature())?;
    writeln!(
        output,
        "Type 'exit' to quit, /reset to clear, /history or /stats to inspect.\n"
    )?;
    Ok(())
}

fn write_history<W: Write>(agent: &ChatAgent, output: &mut W) -> Result<()> {
    for turn in agent.session().history() {
        writeln!(output, "[{}] {}", turn.role(), turn.content())?;
    }
    Ok(())
}

fn write_stats<W: Write>(agent: &ChatAgent, output: &mut W) -> Result<()> {
    let session = agent.session();
    writeln!(
        output,
        "Messages: {} (user: {})",
        session.len(),
        session.user_turns()
    )?;
    writeln!(output, "Model: {}", session.model())?;
    writeln!(output, "Tokens: {}", agent.usage().total_tokens)?;
    writeln!(
        output,
        "Started: {}",
        session.started_at().format("%H:%M:%S")
    )?;
    Ok(())
}
