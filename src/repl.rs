use std::io::{self, BufRead, Write};

use crate::interpreter::Interpreter;

pub const BANNER: &str = "let-lang interactive shell. Type 'exit' to quit.";

/// Feeds `input` to `interpreter` one line at a time, writing each
/// submission's result to `output`. Stops at end of input or a line reading
/// `exit`.
pub fn run<R: BufRead, W: Write>(
    interpreter: &mut Interpreter,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "{}", BANNER)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');

        if line == "exit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let result = interpreter.interpret(line);
        output.write_all(result.as_bytes())?;
        output.flush()?;
    }

    tracing::debug!("shell finished");
    Ok(())
}
