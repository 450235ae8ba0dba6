use std::io::{self, Write};

use storycase_client::{mask_key, BlockingGenerator, OpenAiClient};
use tracing::info;

/// Run the setup checks and report each one. Returns whether all passed.
///
/// The endpoint check is skipped when no key is configured, since the
/// request could only fail with an authentication error.
pub fn run_all<W: Write>(
    generator: &BlockingGenerator<OpenAiClient>,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "Verifying storycase setup\n")?;
    let mut passed = check_api_key(generator, out)?;
    if passed {
        passed &= check_endpoint(generator, out)?;
    }

    writeln!(out)?;
    if passed {
        writeln!(out, "All checks passed.")?;
        info!("all preflight checks passed");
    } else {
        writeln!(out, "Some checks failed. Fix the issues above and run again.")?;
    }
    Ok(passed)
}

fn check_api_key<W: Write>(
    generator: &BlockingGenerator<OpenAiClient>,
    out: &mut W,
) -> io::Result<bool> {
    match generator.config().api_key() {
        Some(key) => {
            writeln!(out, "[ok]   API key found: {}", mask_key(key))?;
            Ok(true)
        }
        None => {
            writeln!(out, "[fail] API key not found")?;
            crate::session::print_setup_help(out)?;
            Ok(false)
        }
    }
}

fn check_endpoint<W: Write>(
    generator: &BlockingGenerator<OpenAiClient>,
    out: &mut W,
) -> io::Result<bool> {
    let config = generator.config();
    match generator.list_models() {
        Ok(models) => {
            writeln!(out, "[ok]   {} reachable, key accepted", config.base_url)?;
            if models.iter().any(|m| m == &config.model) {
                writeln!(out, "[ok]   model {} available", config.model)?;
            } else {
                // Some compatible servers list nothing or use aliases.
                writeln!(out, "[warn] model {} not listed by the endpoint", config.model)?;
            }
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "[fail] {}: {e}", config.base_url)?;
            Ok(false)
        }
    }
}
