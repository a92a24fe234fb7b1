use std::io::Write;

use serde::Serialize;

use crate::error::CliError;

/// Status-bar payload: one JSON object per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarOutput {
    pub text: String,
}

pub fn render(output: &BarOutput) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    write_line(&mut stdout.lock(), output)
}

fn write_line<W: Write>(writer: &mut W, output: &BarOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string(output)?;
    writeln!(writer, "{payload}")?;
    writer.flush()?;
    Ok(())
}
