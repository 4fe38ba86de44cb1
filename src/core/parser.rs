// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/parser.rs
//!
//! Keymap table parser
//!
//! This module parses the declarative keymap text that defines the
//! shortcut catalog. It handles:
//! - All priority classes (essential, common, advanced)
//! - Quick-access slot parameters (quick_access:3)
//! - Trailing attributes (custom, conflicts=form+modal)
//! - Comments and whitespace
//! - Line numbers for error reporting
//!
//! # Architecture
//! The parser uses nom combinators for composable, type-safe parsing of
//! the line structure, with plain token helpers for modifiers and keys.
//!
//! # Line format
//! ```text
//! <priority> = <id>, <context>, <combination>, <action>[:<slot>][, custom][, conflicts=<ctx>[+<ctx>]]
//! ```
//!
//! The parser only reads and structures data - semantic checks (known
//! keys, id naming, slot ranges) happen in validator.rs after parsing.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
};
use nom::{
    character::complete::{char, space0},
    combinator::map,
    multi::many0,
};
use nom::{sequence::preceded, IResult, Parser};
use thiserror::Error;

use crate::core::types::{Action, Context, KeyCombination, Modifier, PriorityClass, ShortcutDefinition};

/// Parse errors with line number context
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("Unknown context '{token}' on line {line}")]
    UnknownContext { token: String, line: usize },

    #[error("Unknown action '{token}' on line {line}")]
    UnknownAction { token: String, line: usize },

    #[error("Unknown attribute '{token}' on line {line}")]
    UnknownAttribute { token: String, line: usize },

    #[error("IO error reading keymap: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors from parsing a key combination string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombinationError {
    #[error("combination is empty")]
    Empty,

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
}

/// Parse a complete keymap text into shortcut definitions
///
/// Blank lines and `#` comments are skipped; every other line must be a
/// well-formed shortcut line. Semantic validation (known keys, unique ids)
/// is the caller's job.
///
/// # Example
/// ```ignore
/// let keymap = "essential = dialog-cancel, global, escape, cancel";
/// let defs = parse_keymap(keymap)?;
/// assert_eq!(defs.len(), 1);
/// ```
pub fn parse_keymap(content: &str) -> Result<Vec<ShortcutDefinition>, ParseError> {
    let mut definitions = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        // Skip empty lines and comments
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        let (rest, raw) = parse_shortcut_line(line_trimmed).map_err(|e| {
            ParseError::InvalidSyntax {
                line: line_num,
                message: format!("{:?}", e),
            }
        })?;

        if !rest.trim().is_empty() {
            return Err(ParseError::InvalidSyntax {
                line: line_num,
                message: format!("trailing input '{}'", rest),
            });
        }

        definitions.push(build_definition(raw, line_num)?);
    }

    Ok(definitions)
}

/// Raw fields of one shortcut line, before token resolution
#[derive(Debug)]
pub struct RawShortcutLine<'a> {
    pub priority: PriorityClass,
    pub id: &'a str,
    pub context: &'a str,
    pub combination: &'a str,
    pub action: &'a str,
    pub attrs: Vec<&'a str>,
}

/// Parse a single shortcut line into raw fields
///
/// Format: PRIORITY = ID, CONTEXT, COMBINATION, ACTION[, ATTRS...]
/// Example: common = edit-copy, global, primary+c, copy_prompt, custom
pub fn parse_shortcut_line(input: &str) -> IResult<&str, RawShortcutLine<'_>> {
    let (input, priority) = parse_priority_class(input)?;
    let (input, _) = (space0, char('='), space0).parse(input)?;
    let (input, id) = take_until(",")(input)?;
    let (input, _) = (char(','), space0).parse(input)?;
    let (input, context) = take_until(",")(input)?;
    let (input, _) = (char(','), space0).parse(input)?;
    let (input, combination) = take_until(",")(input)?;
    let (input, _) = (char(','), space0).parse(input)?;
    let (input, action) = take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == ':')(input)?;
    let (input, attrs) = many0(preceded(
        (space0, char(','), space0),
        take_while1(|c: char| c != ','),
    ))
    .parse(input)?;

    Ok((
        input,
        RawShortcutLine {
            priority,
            id: id.trim(),
            context: context.trim(),
            combination: combination.trim(),
            action,
            attrs,
        },
    ))
}

/// Parse the priority class keyword (essential, common, advanced)
pub fn parse_priority_class(input: &str) -> IResult<&str, PriorityClass> {
    map(
        alt((tag("essential"), tag("common"), tag("advanced"))),
        |s: &str| match s {
            "essential" => PriorityClass::Essential,
            "common" => PriorityClass::Common,
            "advanced" => PriorityClass::Advanced,
            _ => unreachable!(),
        },
    )
    .parse(input)
}

/// Parse a key combination string like "primary+shift+k" or "escape"
///
/// Every `+`-separated token except the last must be a modifier; the last
/// is the key, stored in canonical form. Whether the key is *known* is
/// checked later by the validator, not here.
pub fn parse_combination(input: &str) -> Result<KeyCombination, CombinationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CombinationError::Empty);
    }

    let parts: Vec<&str> = input.split('+').map(str::trim).collect();

    let mut modifiers = Vec::new();
    for part in &parts[..parts.len() - 1] {
        match Modifier::parse(part) {
            Some(modifier) => modifiers.push(modifier),
            None => return Err(CombinationError::UnknownModifier(part.to_string())),
        }
    }

    let key = parts[parts.len() - 1];
    if key.is_empty() {
        return Err(CombinationError::Empty);
    }

    Ok(KeyCombination::new(modifiers, key))
}

/// Resolve raw line fields into a ShortcutDefinition
fn build_definition(raw: RawShortcutLine<'_>, line: usize) -> Result<ShortcutDefinition, ParseError> {
    let context = Context::parse(raw.context).ok_or_else(|| ParseError::UnknownContext {
        token: raw.context.to_string(),
        line,
    })?;

    let combination =
        parse_combination(raw.combination).map_err(|e| ParseError::InvalidSyntax {
            line,
            message: e.to_string(),
        })?;

    // Action may carry a slot parameter: quick_access:3
    let (action_name, slot) = match raw.action.split_once(':') {
        Some((name, slot_str)) => {
            let slot = slot_str.parse::<u8>().map_err(|_| ParseError::InvalidSyntax {
                line,
                message: format!("invalid slot number '{}'", slot_str),
            })?;
            (name, Some(slot))
        }
        None => (raw.action, None),
    };

    let action = Action::parse(action_name).ok_or_else(|| ParseError::UnknownAction {
        token: action_name.to_string(),
        line,
    })?;

    let mut customizable = false;
    let mut conflicts_with = Vec::new();

    for attr in &raw.attrs {
        let attr = attr.trim();
        if attr == "custom" {
            customizable = true;
        } else if attr == "fixed" {
            customizable = false;
        } else if let Some(list) = attr.strip_prefix("conflicts=") {
            for token in list.split('+') {
                let ctx = Context::parse(token).ok_or_else(|| ParseError::UnknownContext {
                    token: token.to_string(),
                    line,
                })?;
                conflicts_with.push(ctx);
            }
        } else {
            return Err(ParseError::UnknownAttribute {
                token: attr.to_string(),
                line,
            });
        }
    }

    Ok(ShortcutDefinition {
        id: raw.id.to_string(),
        combination,
        context,
        priority: raw.priority,
        action,
        slot,
        customizable,
        conflicts_with,
    })
}
