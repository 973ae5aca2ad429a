//! An interactive correction loop over text input and output.

#[cfg(test)]
#[path = "../../tests/unit/extensions/interactive_test.rs"]
mod interactive_test;

use geozone_core::correction::{CorrectionControl, CorrectionKind, CorrectionLedger};
use geozone_core::geocoding::GeocodeResolver;
use geozone_core::models::Session;
use geozone_core::utils::GenericResult;
use std::io::{BufRead, Write};

/// A text prompt used to ask for corrections.
pub struct Prompt<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Prompt<'a> {
    /// Creates a new instance of `Prompt`.
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> GenericResult<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(answer.trim().to_string())
    }
}

/// Asks for corrections of failed addresses and retries them until every address is resolved or
/// a round ends without any staged correction. Returns amount of resolved records.
pub fn run_correction_rounds(
    session: &mut Session,
    ledger: &CorrectionLedger,
    resolver: &GeocodeResolver,
    prompt: &mut Prompt,
) -> GenericResult<usize> {
    let mut total_resolved = 0;

    loop {
        let controls = ledger.controls(session);
        if controls.is_empty() {
            break;
        }

        writeln!(prompt.output, "{} address(es) cannot be located, press enter to skip one", controls.len())?;

        let mut staged = 0;
        for control in controls.iter() {
            if let Some(text) = ask_correction(prompt, control)? {
                ledger.apply_choice(session, control.index, text.as_str())?;
                staged += 1;
            }
        }

        if staged == 0 {
            break;
        }

        let report = ledger.retry(session, resolver);
        total_resolved += report.resolved.len();

        writeln!(
            prompt.output,
            "resolved: {}, still failed: {}, abandoned: {}",
            report.resolved.len(),
            report.failed.len(),
            report.abandoned.len()
        )?;
    }

    Ok(total_resolved)
}

/// Asks for another dispatch address after the previous one cannot be located. A suggestion, when
/// present, is offered as the first option. Returns `None` when the answer is empty.
pub fn ask_dispatch_address(
    prompt: &mut Prompt,
    address: &str,
    suggestion: Option<&str>,
) -> GenericResult<Option<String>> {
    writeln!(prompt.output, "cannot locate dispatch point '{address}', press enter to stop")?;

    let answer = match suggestion {
        Some(suggestion) => {
            writeln!(prompt.output, "  [1] {suggestion}")?;
            match prompt.ask("  select suggestion or enter another address: ")?.as_str() {
                "1" => suggestion.to_string(),
                other => other.to_string(),
            }
        }
        None => prompt.ask("  enter another address: ")?,
    };

    Ok(Some(answer).filter(|answer| !answer.is_empty()))
}

fn ask_correction(prompt: &mut Prompt, control: &CorrectionControl) -> GenericResult<Option<String>> {
    writeln!(prompt.output, "#{} {}: '{}'", control.index + 1, control.client, control.address)?;

    let answer = match &control.kind {
        CorrectionKind::Choice { original, suggestion } => {
            writeln!(prompt.output, "  [1] {original}")?;
            writeln!(prompt.output, "  [2] {suggestion}")?;

            match prompt.ask("  select address: ")?.as_str() {
                "" => None,
                "1" => Some(original.clone()),
                "2" => Some(suggestion.clone()),
                other => {
                    writeln!(prompt.output, "  unknown option '{other}', skipped")?;
                    None
                }
            }
        }
        CorrectionKind::FreeText => Some(prompt.ask("  enter corrected address: ")?).filter(|text| !text.is_empty()),
    };

    Ok(answer)
}
