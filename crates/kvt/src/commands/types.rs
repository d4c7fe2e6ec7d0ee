//! Types command implementation.
//!
//! Lists the configured types with their kinds and aliases.

use super::{CommandContext, Result};
use crate::output::{format_types_json, format_types_table};

/// Executes the types command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let input = ctx.load_session()?;
    let fallback = input.fallback_type().map(|key_type| key_type.as_ref());

    if ctx.json_output {
        println!("{}", format_types_json(input.types(), fallback)?);
    } else if !ctx.quiet {
        let hint = input.available_types_hint();
        print!("{}", format_types_table(input.types(), fallback, ctx.use_colors));
        if ctx.verbose && !hint.is_empty() {
            println!("\nType: {hint}");
        }
    }

    Ok(())
}
