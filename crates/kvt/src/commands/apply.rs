//! Apply command implementation.
//!
//! Parses a number modifier such as `+5` or `÷ 3` and applies it to a base
//! value.

use kvtags_rs::types::{ModifierValue, NumberModifierType, RoundMode, ValueType};
use serde::Serialize;

use super::{CommandContext, CommandError, Result};
use crate::output::helpers::format_number;

/// Result of applying a modifier.
#[derive(Debug, Serialize)]
pub struct ApplyResult {
    pub modifier: ModifierValue,
    pub base: f64,
    pub round: RoundMode,
    pub result: f64,
}

/// Parses `modifier` and `round` and applies the modifier to `base`.
///
/// # Errors
///
/// Returns `CommandError::Input` for an invalid modifier and
/// `KeyValueError::InvalidRoundMode` for an unknown round mode.
pub fn apply_modifier(modifier: &str, base: f64, round: &str) -> Result<ApplyResult> {
    let round: RoundMode = round.parse()?;
    let modifier = NumberModifierType::new()
        .parse_str(modifier)
        .ok_or_else(|| CommandError::Input(format!("'{modifier}' is not a number modifier")))?;

    Ok(ApplyResult {
        result: NumberModifierType::apply(&modifier, base, round),
        modifier,
        base,
        round,
    })
}

/// Executes the apply command.
pub fn execute(ctx: &CommandContext, modifier: &str, base: f64, round: &str) -> Result<()> {
    let result = apply_modifier(modifier, base, round)?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if ctx.verbose {
        println!(
            "{} {} {} = {}",
            format_number(result.base),
            result.modifier.operator.symbol(),
            format_number(result.modifier.number),
            format_number(result.result)
        );
    } else if !ctx.quiet {
        println!("{}", format_number(result.result));
    }

    Ok(())
}
