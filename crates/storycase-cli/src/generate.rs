use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use storycase_client::{BlockingGenerator, ModelClient};
use storycase_core::{export_json, render_suite};
use tracing::info;

use crate::config::GenerateArgs;

/// Resolve the story from `--story` or `--story-file` (`-` is stdin).
pub fn load_story(args: &GenerateArgs) -> Result<String> {
    if let Some(story) = &args.story {
        return Ok(story.clone());
    }
    match args.story_file.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut story = String::new();
            io::stdin()
                .read_to_string(&mut story)
                .context("failed to read story from stdin")?;
            Ok(story)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read story file {}", path.display())),
        None => anyhow::bail!("either --story or --story-file is required"),
    }
}

/// Generate once and print the result. Any error is returned to `main`,
/// which exits non-zero.
pub fn run<C: ModelClient, W: Write>(
    generator: &BlockingGenerator<C>,
    args: &GenerateArgs,
    story: &str,
    out: &mut W,
) -> Result<()> {
    let suite = generator.generate(story)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &suite)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_suite(&suite))?;
    }

    if let Some(path) = &args.output {
        export_json(&suite, path)?;
        info!("exported {} test cases to {}", suite.len(), path.display());
    }
    Ok(())
}
