//! Query command implementation.
//!
//! Parses text and prints the query fragment of every entry.

use kvtags_rs::entry::Entry;
use kvtags_rs::query::QueryFragment;
use tracing::debug;

use super::parse::feed_words;
use super::{CommandContext, CommandError, Result};
use crate::output::{format_queries_json, format_queries_table};

/// Collects the query fragments of `entries`, keyed by type id.
///
/// Entries without a projection, such as number modifiers, are skipped.
pub fn collect_queries(entries: &[Entry]) -> Vec<(&str, QueryFragment)> {
    entries
        .iter()
        .filter_map(|entry| match entry.query() {
            Some(fragment) => Some((entry.id(), fragment)),
            None => {
                debug!(key = %entry.id(), "Entry has no query projection");
                None
            }
        })
        .collect()
}

/// Executes the query command.
pub fn execute(ctx: &CommandContext, words: &[String]) -> Result<()> {
    let mut input = ctx.load_session()?;
    let leftover = feed_words(&mut input, words);
    if !leftover.is_empty() {
        return Err(CommandError::Input(format!("could not parse '{leftover}'")));
    }

    let mut entries = input.default_entries().to_vec();
    entries.extend_from_slice(input.entries());
    let queries = collect_queries(&entries);

    if ctx.json_output {
        println!("{}", format_queries_json(&queries)?);
    } else if !ctx.quiet {
        print!("{}", format_queries_table(&queries, ctx.use_colors));
    }

    Ok(())
}
