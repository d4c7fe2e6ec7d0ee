//! Parse command implementation.
//!
//! Feeds text through an input session and prints the resulting entries.

use kvtags_rs::input::KeyValueInput;
use tracing::debug;

use super::{CommandContext, Result};
use crate::output::{format_entries_json, format_entries_table};

/// Feeds `words` to `input` as one line and returns the text left over.
pub fn feed_words(input: &mut KeyValueInput, words: &[String]) -> String {
    let line = words.join(" ");
    let leftover = input.feed(&line);
    debug!(
        entries = input.entries().len(),
        revision = input.revision(),
        leftover = %leftover,
        "Parsed input"
    );
    leftover
}

/// Executes the parse command.
pub fn execute(ctx: &CommandContext, words: &[String]) -> Result<()> {
    let mut input = ctx.load_session()?;
    let leftover = feed_words(&mut input, words);

    if ctx.json_output {
        let output = format_entries_json(input.entries(), input.default_entries(), &leftover)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_entries_table(
            input.entries(),
            input.default_entries(),
            &leftover,
            ctx.use_colors,
        );
        print!("{output}");
    }

    Ok(())
}
