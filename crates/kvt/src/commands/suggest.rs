//! Suggest command implementation.
//!
//! Prints type name suggestions, or value suggestions for one type.

use kvtags_rs::display::SuggestionList;
use kvtags_rs::error::KeyValueError;
use kvtags_rs::input::KeyValueInput;
use kvtags_rs::suggest::closest_alias;

use super::{CommandContext, Result};
use crate::output::{format_suggestions_json, format_suggestions_table};

/// Computes suggestions for `prefix`, as a value of `key` when given.
///
/// # Errors
///
/// Returns `KeyValueError::UnknownType` if `key` names no configured type.
pub fn suggestions_for(
    input: &mut KeyValueInput,
    key: Option<&str>,
    prefix: &str,
) -> Result<Option<SuggestionList>> {
    if let Some(key) = key {
        if !input.add_partial_entry(key) {
            let suggestion = closest_alias(input.types(), key);
            return Err(KeyValueError::unknown_type(key, suggestion).into());
        }
    }
    Ok(input.suggestions(prefix))
}

/// Executes the suggest command.
pub fn execute(ctx: &CommandContext, key: Option<&str>, prefix: &str) -> Result<()> {
    let mut input = ctx.load_session()?;
    let list = suggestions_for(&mut input, key, prefix)?;

    if ctx.json_output {
        println!("{}", format_suggestions_json(list.as_ref())?);
    } else if !ctx.quiet {
        print!("{}", format_suggestions_table(list.as_ref(), ctx.use_colors));
    }

    Ok(())
}
