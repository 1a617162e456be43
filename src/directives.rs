//! Directive parsing — turns a raw chat message into a clean text body plus
//! structured variables and flags.
//!
//! A directive is a marker-prefixed token: a *variable* marker consumes the
//! following token as its value (`.alert 10:00`), a *flag* marker stands
//! alone (`-urgent`). Everything else is retained as plain text. The router
//! inspects the result to decide which handler to dispatch to.
//!
//! Parsing is a single left-to-right pass with one token of lookahead and a
//! per-token consumed bit. It is a total function: every input, including
//! the empty string, yields a well-formed [`ParseResult`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::DirectiveConfig;

/// Output of a single parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Residual plain text after directives and their values are removed.
    ///
    /// Only the extremes are trimmed. Positions emptied by removed tokens
    /// still contribute a separator, so mid-message removals leave internal
    /// runs of spaces; collapsing those is the caller's call.
    pub clean_message: String,
    /// Variable name (marker stripped) → consumed value token.
    /// On repeated names the later occurrence wins.
    pub variables: HashMap<String, String>,
    /// Flag tokens, marker included, in input order. Duplicates preserved.
    pub flags: Vec<String>,
}

/// Parse a raw message with the default markers (`.` variable, `-` flag).
pub fn parse_directives(raw: &str) -> ParseResult {
    DirectiveConfig::default().parse(raw)
}

impl DirectiveConfig {
    /// Parse a raw message into its clean body, variables, and flags.
    ///
    /// Splits on the literal space character, so runs of spaces produce
    /// empty tokens. That is deliberate: an empty token between a variable
    /// marker and its would-be value breaks their adjacency, and the marker
    /// token then falls through to plain text.
    pub fn parse(&self, raw: &str) -> ParseResult {
        if raw.is_empty() {
            return ParseResult::default();
        }

        let tokens: Vec<&str> = raw.split(' ').collect();
        let mut consumed = vec![false; tokens.len()];

        let mut variables = HashMap::new();
        let mut flags = Vec::new();
        // One slot per input position; removed positions stay empty so the
        // join below reproduces the original separators.
        let mut emitted: Vec<&str> = Vec::with_capacity(tokens.len());

        for i in 0..tokens.len() {
            if consumed[i] {
                emitted.push("");
                continue;
            }
            let token = tokens[i];

            if token.starts_with(self.var_marker) {
                if let Some(value) = tokens.get(i + 1).copied().filter(|next| {
                    !next.is_empty()
                        && !next.starts_with(self.var_marker)
                        && !next.starts_with(self.flag_marker)
                }) {
                    // starts_with guarantees the prefix is present.
                    let name = token.strip_prefix(self.var_marker).unwrap_or(token);
                    variables.insert(name.to_string(), value.to_string());
                    consumed[i + 1] = true;
                    emitted.push("");
                    continue;
                }
                // Unmatched variable marker: retained as text verbatim.
                emitted.push(token);
                continue;
            }

            if token.starts_with(self.flag_marker) {
                // Flags never claim the next token.
                flags.push(token.to_string());
                emitted.push("");
                continue;
            }

            emitted.push(token);
        }

        ParseResult {
            clean_message: emitted.join(" ").trim_matches(' ').to_string(),
            variables,
            flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn variable_and_flag_extracted() {
        let result = parse_directives(".alert 10:00 review details -urgent");
        assert_eq!(result.clean_message, "review details");
        assert_eq!(result.variables, vars(&[("alert", "10:00")]));
        assert_eq!(result.flags, vec!["-urgent"]);
    }

    #[test]
    fn mixed_directives_preserve_text_order() {
        let result = parse_directives("hello .task focus -flag extra -list world .note quick");
        let normalized = result
            .clean_message
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(normalized, "hello extra world");
        assert_eq!(result.variables, vars(&[("task", "focus"), ("note", "quick")]));
        assert_eq!(result.flags, vec!["-flag", "-list"]);
    }

    #[test]
    fn trailing_variable_marker_stays_in_text() {
        let result = parse_directives("plain message .note");
        assert_eq!(result.clean_message, "plain message .note");
        assert!(result.variables.is_empty());
        assert!(result.flags.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_result() {
        assert_eq!(parse_directives(""), ParseResult::default());
    }

    #[test]
    fn repeated_variable_last_write_wins() {
        let result = parse_directives(".a 1 .a 2");
        assert_eq!(result.variables, vars(&[("a", "2")]));
        assert_eq!(result.clean_message, "");
    }

    #[test]
    fn marker_free_input_is_trimmed_passthrough() {
        let result = parse_directives("  just a plain sentence ");
        assert_eq!(result.clean_message, "just a plain sentence");
        assert!(result.variables.is_empty());
        assert!(result.flags.is_empty());
    }

    #[test]
    fn variable_marker_before_another_marker_is_text() {
        // ".a" cannot take "-b" as a value, and it does not become a flag
        // either (it carries the variable marker, not the flag marker).
        let result = parse_directives(".a -b");
        assert_eq!(result.clean_message, ".a");
        assert!(result.variables.is_empty());
        assert_eq!(result.flags, vec!["-b"]);
    }

    #[test]
    fn variable_marker_before_variable_marker_is_text() {
        let result = parse_directives(".a .b c");
        assert_eq!(result.clean_message, ".a");
        assert_eq!(result.variables, vars(&[("b", "c")]));
    }

    #[test]
    fn flag_never_consumes_following_token() {
        let result = parse_directives("-x value");
        assert_eq!(result.flags, vec!["-x"]);
        assert_eq!(result.clean_message, "value");
        assert!(result.variables.is_empty());
    }

    #[test]
    fn flag_directly_before_variable_marker() {
        // Flag handling never marks the next token consumed, so the
        // variable marker right after it is evaluated normally.
        let result = parse_directives("-go .task now");
        assert_eq!(result.flags, vec!["-go"]);
        assert_eq!(result.variables, vars(&[("task", "now")]));
        assert_eq!(result.clean_message, "");
    }

    #[test]
    fn duplicate_flags_preserved_in_order() {
        let result = parse_directives("-a text -b -a");
        assert_eq!(result.flags, vec!["-a", "-b", "-a"]);
        assert_eq!(result.clean_message, "text");
    }

    #[test]
    fn double_space_breaks_marker_value_adjacency() {
        // Literal-space split produces an empty token between ".alert" and
        // "soon"; the empty lookahead disqualifies the variable.
        let result = parse_directives(".alert  soon");
        assert!(result.variables.is_empty());
        assert_eq!(result.clean_message, ".alert  soon");
    }

    #[test]
    fn internal_gaps_from_removals_are_not_collapsed() {
        let result = parse_directives("a .k v b");
        assert_eq!(result.clean_message, "a   b");
    }

    #[test]
    fn bare_marker_registers_empty_variable_name() {
        // Stripping the marker from "." leaves the empty name; the literal
        // contract registers it rather than special-casing.
        let result = parse_directives(". value");
        assert_eq!(result.variables, vars(&[("", "value")]));
    }

    #[test]
    fn custom_markers_are_honored() {
        let config = DirectiveConfig {
            var_marker: '!',
            flag_marker: '~',
        };
        let result = config.parse("!alert 10:00 hi ~loud");
        assert_eq!(result.variables, vars(&[("alert", "10:00")]));
        assert_eq!(result.flags, vec!["~loud"]);
        assert_eq!(result.clean_message, "hi");
        // Default markers are now plain text under this config.
        let other = config.parse(".alert 10:00 -urgent");
        assert!(other.variables.is_empty());
        assert!(other.flags.is_empty());
        assert_eq!(other.clean_message, ".alert 10:00 -urgent");
    }

    #[test]
    fn whitespace_only_input() {
        let result = parse_directives("   ");
        assert_eq!(result.clean_message, "");
        assert!(result.variables.is_empty());
        assert!(result.flags.is_empty());
    }

    #[test]
    fn variable_at_end_of_longer_message() {
        let result = parse_directives("wrap up .task");
        assert_eq!(result.clean_message, "wrap up .task");
        assert!(result.variables.is_empty());
    }
}
