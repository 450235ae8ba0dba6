//! Interactive menu: pick or type a story, generate, optionally export.
//!
//! Generic over the input/output streams so sessions can be driven from
//! tests with in-memory buffers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use storycase_client::{BlockingGenerator, ModelClient};
use storycase_core::{export_json, render_suite, StorycaseError, TestSuite, DEFAULT_EXPORT_FILE};
use storycase_prompts::PRESETS;
use tracing::{error, info};

/// How an interactive session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// The user quit or input reached EOF.
    Quit,
    /// The credential was rejected; nothing else can succeed this run.
    Fatal(StorycaseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Preset(usize),
    Custom,
    Quit,
    Invalid,
}

/// Parse a menu answer. Presets are numbered from 1, custom entry follows them.
pub fn parse_choice(input: &str) -> MenuChoice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return MenuChoice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=PRESETS.len()).contains(&n) => MenuChoice::Preset(n - 1),
        Ok(n) if n == PRESETS.len() + 1 => MenuChoice::Custom,
        _ => MenuChoice::Invalid,
    }
}

/// Read a multi-line story until two consecutive empty lines or EOF.
/// Trailing empty lines are dropped.
pub fn read_story<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut lines: Vec<String> = Vec::new();
    loop {
        let mut buf = String::new();
        if input.read_line(&mut buf)? == 0 {
            break;
        }
        let line = buf.trim_end_matches(['\n', '\r']).to_string();
        if line.is_empty() && lines.last().is_some_and(|l| l.is_empty()) {
            break;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    Ok(lines.join("\n"))
}

/// Run the menu loop until the user quits, input ends, or a fatal error.
///
/// Every non-fatal error is reported and the menu is shown again.
pub fn run<C, R, W>(
    generator: &BlockingGenerator<C>,
    input: &mut R,
    out: &mut W,
) -> io::Result<SessionEnd>
where
    C: ModelClient,
    R: BufRead,
    W: Write,
{
    loop {
        print_menu(out)?;
        let Some(answer) = prompt_line(input, out, "\nEnter choice: ")? else {
            return Ok(SessionEnd::Quit);
        };

        let story = match parse_choice(&answer) {
            MenuChoice::Quit => return Ok(SessionEnd::Quit),
            MenuChoice::Preset(i) => PRESETS[i].story.to_string(),
            MenuChoice::Custom => {
                writeln!(out, "\nEnter your user story (press Enter twice when done):")?;
                out.flush()?;
                read_story(input)?
            }
            MenuChoice::Invalid => {
                writeln!(out, "Invalid choice. Using default story.")?;
                PRESETS[0].story.to_string()
            }
        };

        writeln!(out, "\nGenerating test cases...")?;
        out.flush()?;

        match generator.generate(&story) {
            Ok(suite) => {
                write!(out, "\n{}", render_suite(&suite))?;
                offer_export(&suite, input, out)?;
            }
            Err(e) if e.is_fatal() => {
                error!("generation failed: {e}");
                writeln!(out, "Configuration error: {e}")?;
                print_setup_help(out)?;
                return Ok(SessionEnd::Fatal(e));
            }
            Err(e) => {
                error!("generation failed: {e}");
                report_error(&e, out)?;
            }
        }
        writeln!(out)?;
    }
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Select a user story to generate test cases:")?;
    for (i, preset) in PRESETS.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, preset.label)?;
    }
    writeln!(out, "{}. Enter custom user story", PRESETS.len() + 1)?;
    writeln!(out, "q. Quit")
}

fn offer_export<R: BufRead, W: Write>(
    suite: &TestSuite,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let answer = prompt_line(input, out, "Export to JSON? (y/n): ")?.unwrap_or_default();
    if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        return Ok(());
    }

    let prompt = format!("Enter filename (default: {DEFAULT_EXPORT_FILE}): ");
    let filename = prompt_line(input, out, &prompt)?
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_EXPORT_FILE.to_string());

    match export_json(suite, Path::new(&filename)) {
        Ok(()) => {
            info!("exported {} test cases to {filename}", suite.len());
            writeln!(out, "Test cases exported to {filename}")
        }
        // The suite stays on screen; a failed export doesn't end the session.
        Err(e) => writeln!(out, "Error exporting to JSON: {e}"),
    }
}

/// Print `prompt` and read one line. `None` on EOF.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

pub(crate) fn report_error<W: Write>(e: &StorycaseError, out: &mut W) -> io::Result<()> {
    writeln!(out, "Error: {e}")?;
    match e {
        StorycaseError::RateLimited {
            retry_after: Some(d),
            ..
        } => writeln!(out, "Try again in {} seconds.", d.as_secs()),
        e if e.is_retryable() => writeln!(out, "This is usually temporary; try again."),
        _ => Ok(()),
    }
}

pub(crate) fn print_setup_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nSetup:")?;
    writeln!(
        out,
        "1. Get an API key from https://platform.openai.com/api-keys"
    )?;
    writeln!(out, "2. export OPENAI_API_KEY='your-key-here'")?;
    writeln!(out, "3. Or pass --api-key on the command line")
}
