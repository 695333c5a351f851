mod text;

use std::io::Write;

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let rendered = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(output)?,
        OutputFormat::Json => serde_json::to_string(output)?,
        OutputFormat::Text => match output {
            CommandOutput::Page(page) => text::render_page(page),
            CommandOutput::Periods(rows) => text::render_periods(rows),
        },
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
