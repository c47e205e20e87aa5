use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{format_number, MenuChoice, MENU};

const CHOICE_PROMPT: &str = "Enter choice(1/2/3/4/5/6/7/8/9/10/11/12): ";

/// Run the interactive menu loop until the user picks Exit or input ends.
/// Calculation errors and bad input are reported and the loop continues.
pub fn run_session<R: BufRead, W: Write>(mut input: R, output: &mut W) -> io::Result<()> {
    writeln!(output, "{MENU}")?;

    loop {
        let Some(line) = prompt(&mut input, output, CHOICE_PROMPT)? else {
            break;
        };
        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(err) => {
                writeln!(output, "{err}")?;
                writeln!(output)?;
                continue;
            }
        };
        debug!(?choice, "calculator choice");

        match choice {
            MenuChoice::Exit => break,
            MenuChoice::Binary(op) => {
                let Some(x) = read_number(&mut input, output, "Enter first number: ")? else {
                    break;
                };
                let Some(x) = x else {
                    writeln!(output, "Invalid input. Please enter numbers only.")?;
                    continue;
                };
                let Some(y) = read_number(&mut input, output, "Enter second number: ")? else {
                    break;
                };
                let Some(y) = y else {
                    writeln!(output, "Invalid input. Please enter numbers only.")?;
                    continue;
                };
                let lhs = format!("{} {} {}", format_number(x), op.symbol(), format_number(y));
                match op.apply(x, y) {
                    Ok(result) => writeln!(output, "{lhs} = {}", format_number(result))?,
                    Err(err) => writeln!(output, "{lhs} = Error: {err}")?,
                }
            }
            MenuChoice::Unary(op) => {
                let Some(x) = read_number(&mut input, output, "Enter number: ")? else {
                    break;
                };
                let Some(x) = x else {
                    writeln!(output, "Invalid input. Please enter a number only.")?;
                    continue;
                };
                match op.apply(x) {
                    Ok(result) => {
                        writeln!(output, "{} = {}", op.describe(x), format_number(result))?
                    }
                    Err(err) => writeln!(output, "{} = Error: {err}", op.describe(x))?,
                }
            }
        }
        writeln!(output)?;
    }

    writeln!(output, "Exiting calculator. Goodbye!")?;
    Ok(())
}

/// Print `text` and read one line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Outer `None`: end of input. Inner `None`: the line was not a number.
fn read_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<Option<f64>>> {
    Ok(prompt(input, output, text)?.map(|line| line.parse::<f64>().ok()))
}
