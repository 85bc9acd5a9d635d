//! Rendering of [`DecodeError`] chains.
//!
//! The chain is unwound from the outermost failure down to its root cause.
//! Every `PropertyDecodeFailed` link becomes a frame, one indentation level
//! deeper than the one before. `TypeDecodeFailed` links and `Wrapped` links
//! that hold another `DecodeError` are passed through without a frame. The
//! root cause is printed last, after a blank line:
//!
//! ```text
//!   failing property: "address" of type Person
//!     failing property: "zip"(key: "zip_code") of type Address
//!
//!       Cause: invalid type: integer `1`, expected a string
//! ```
//!
//! A root cause with no frames above it is printed on its own, unindented.

use crate::config::RenderConfig;
use crate::error::{DecodeError, TypeName};
use std::fmt;

/// One property frame of an unwound chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainFrame<'a> {
    pub owner_type: TypeName,
    pub property: &'a str,
    pub key: &'a str,
}

impl fmt::Display for ChainFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.property == self.key {
            write!(f, "failing property: \"{}\" of type {}", self.property, self.owner_type)
        } else {
            write!(
                f,
                "failing property: \"{}\"(key: \"{}\") of type {}",
                self.property, self.key, self.owner_type
            )
        }
    }
}

/// What an unwound chain ends in.
#[derive(Debug, Clone, Copy)]
pub enum Terminal<'a> {
    /// The root cause.
    Error(&'a DecodeError),
    /// Unwinding stopped after following this many links.
    Truncated(usize),
}

impl fmt::Display for Terminal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error = match self {
            Self::Error(error) => *error,
            Self::Truncated(links) => return write!(f, "... chain truncated after {links} links"),
        };

        match error {
            DecodeError::Wrapped(cause) => write!(f, "Cause: {cause}"),
            DecodeError::DateParseFailed { input } => {
                write!(f, "Could not parse Date from this value: {input}")
            }
            DecodeError::ValidationFailed {
                owner_type,
                property,
                parsed_value,
            } => write!(
                f,
                "Could not decode type {owner_type}. Validation for the property {property} failed. The parsed value was {parsed_value}"
            ),
            // Only reachable for a hand-built `Terminal`; print its root cause.
            DecodeError::PropertyDecodeFailed { .. } | DecodeError::TypeDecodeFailed { .. } => {
                fmt::Display::fmt(&Terminal::Error(error.root_cause()), f)
            }
        }
    }
}

/// A chain unwound into its frames, outermost first, and its terminal.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    pub frames: Vec<ChainFrame<'a>>,
    pub terminal: Terminal<'a>,
}

/// Unwind `error`, following at most `max_depth` links.
#[must_use]
pub fn unwind(error: &DecodeError, max_depth: usize) -> Chain<'_> {
    let mut frames = Vec::new();
    let mut current = error;
    let mut links = 0;

    while let Some(inner) = current.inner() {
        if links == max_depth {
            return Chain {
                frames,
                terminal: Terminal::Truncated(links),
            };
        }
        if let DecodeError::PropertyDecodeFailed {
            property,
            key,
            owner_type,
            ..
        } = current
        {
            frames.push(ChainFrame {
                owner_type: *owner_type,
                property,
                key,
            });
        }
        current = inner;
        links += 1;
    }

    Chain {
        frames,
        terminal: Terminal::Error(current),
    }
}

/// Lays out decode error chains according to a [`RenderConfig`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer with the given configuration.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `error` and its whole chain.
    #[must_use]
    pub fn render(&self, error: &DecodeError) -> String {
        let chain = unwind(error, self.config.max_depth);
        if chain.frames.is_empty() {
            return chain.terminal.to_string();
        }

        let mut lines = Vec::with_capacity(chain.frames.len() + 2);
        for (depth, frame) in chain.frames.iter().enumerate() {
            lines.push(format!("{}{frame}", self.config.indent.repeat(depth + 1)));
        }
        lines.push(String::new());
        lines.push(format!(
            "{}{}",
            self.config.indent.repeat(chain.frames.len() + 1),
            chain.terminal
        ));

        lines.join("\n")
    }
}

/// Render `error` with the default configuration.
#[must_use]
pub fn render(error: &DecodeError) -> String {
    Renderer::default().render(error)
}

impl DecodeError {
    /// This error's chain, unwound with the default depth bound.
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        unwind(self, RenderConfig::default().max_depth)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpaqueValue;
    use pretty_assertions::assert_eq;

    struct Person;
    struct Address;

    fn person() -> TypeName {
        TypeName::of::<Person>()
    }

    fn date(input: &str) -> DecodeError {
        DecodeError::date_parse_failed(input)
    }

    /// `k` property frames named `p0..pk` over one date failure.
    fn chain_of(k: usize) -> DecodeError {
        (0..k).rev().fold(date("x"), |inner, i| {
            DecodeError::property_failed(format!("p{i}"), format!("p{i}"), person(), inner)
        })
    }

    fn indentation(line: &str) -> usize {
        (line.len() - line.trim_start_matches(' ').len()) / 2
    }

    #[test]
    fn test_root_level_date_failure() {
        assert_eq!(
            date("2021-99-99").to_string(),
            "Could not parse Date from this value: 2021-99-99"
        );
    }

    #[test]
    fn test_root_level_wrapped_and_validation() {
        let wrapped = DecodeError::Wrapped(anyhow::anyhow!("missing field `name`"));
        assert_eq!(wrapped.to_string(), "Cause: missing field `name`");

        let validation =
            DecodeError::validation_failed(person(), "age", OpaqueValue::new(-4));
        assert_eq!(
            validation.to_string(),
            "Could not decode type Person. Validation for the property age failed. The parsed value was -4"
        );
    }

    #[test]
    fn test_single_property_frame() {
        let error = DecodeError::property_failed("age", "age", person(), date("x"));
        assert_eq!(
            error.to_string(),
            "  failing property: \"age\" of type Person\n\n    Could not parse Date from this value: x"
        );
    }

    #[test]
    fn test_property_with_distinct_key() {
        let error = DecodeError::property_failed("age", "user_age", person(), date("x"));
        let rendered = error.to_string();
        assert!(rendered.starts_with(
            "  failing property: \"age\"(key: \"user_age\") of type Person\n"
        ));
    }

    #[test]
    fn test_nested_frames_indent_deeper() {
        let error = DecodeError::property_failed(
            "address",
            "address",
            person(),
            DecodeError::type_failed(
                TypeName::of::<Address>(),
                DecodeError::property_failed(
                    "zip",
                    "zip_code",
                    TypeName::of::<Address>(),
                    DecodeError::Wrapped(anyhow::anyhow!("expected a string")),
                ),
            ),
        );

        assert_eq!(
            error.to_string(),
            [
                "  failing property: \"address\" of type Person",
                "    failing property: \"zip\"(key: \"zip_code\") of type Address",
                "",
                "      Cause: expected a string",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_type_failure_is_transparent() {
        let error = DecodeError::type_failed(
            person(),
            DecodeError::validation_failed(person(), "age", OpaqueValue::new(200)),
        );
        assert_eq!(
            error.to_string(),
            "Could not decode type Person. Validation for the property age failed. The parsed value was 200"
        );

        let error = DecodeError::type_failed(person(), DecodeError::Wrapped(anyhow::anyhow!("boom")));
        assert_eq!(error.to_string(), "Cause: boom");
    }

    #[test]
    fn test_wrapped_decode_error_is_transparent() {
        let inner = DecodeError::property_failed("age", "age", person(), date("x"));
        let error = DecodeError::Wrapped(anyhow::Error::new(inner));
        assert_eq!(
            error.to_string(),
            "  failing property: \"age\" of type Person\n\n    Could not parse Date from this value: x"
        );
    }

    #[test]
    fn test_context_on_wrapped_decode_error_is_kept() {
        let inner = DecodeError::property_failed("age", "age", person(), date("x"));
        let cause = anyhow::Error::new(inner).context("while loading users.json");

        let error = DecodeError::property_failed(
            "users",
            "users",
            TypeName::named("Directory"),
            DecodeError::from_cause(cause),
        );
        assert_eq!(
            error.to_string(),
            "  failing property: \"users\" of type Directory\n\n    Cause: while loading users.json"
        );
    }

    #[test]
    fn test_terminal_always_renders_a_root_cause() {
        let error = DecodeError::type_failed(
            person(),
            DecodeError::property_failed("age", "user_age", person(), date("x")),
        );
        assert_eq!(
            Terminal::Error(&error).to_string(),
            "Could not parse Date from this value: x"
        );
    }

    #[test]
    fn test_chain_depth_produces_k_frames() {
        for k in 0..8 {
            let rendered = chain_of(k).to_string();
            let lines: Vec<&str> = rendered.lines().collect();

            if k == 0 {
                assert_eq!(lines, vec!["Could not parse Date from this value: x"]);
                continue;
            }

            assert_eq!(lines.len(), k + 2);
            for (depth, line) in lines[..k].iter().enumerate() {
                assert_eq!(indentation(line), depth + 1);
                assert!(line.trim_start().starts_with(&format!("failing property: \"p{depth}\"")));
            }
            assert_eq!(lines[k], "");
            assert_eq!(indentation(lines[k + 1]), k + 1);
            assert_eq!(lines[k + 1].trim_start(), "Could not parse Date from this value: x");
        }
    }

    #[test]
    fn test_unwind_frames_outermost_first() {
        let error = chain_of(3);
        let chain = error.chain();

        let properties: Vec<&str> = chain.frames.iter().map(|frame| frame.property).collect();
        assert_eq!(properties, vec!["p0", "p1", "p2"]);
        assert!(matches!(
            chain.terminal,
            Terminal::Error(DecodeError::DateParseFailed { input }) if input == "x"
        ));
    }

    #[test]
    fn test_truncation_bounds_unwinding() {
        let renderer = Renderer::new(RenderConfig::default().with_max_depth(2));
        let rendered = renderer.render(&chain_of(5));

        assert_eq!(
            rendered,
            [
                "  failing property: \"p0\" of type Person",
                "    failing property: \"p1\" of type Person",
                "",
                "      ... chain truncated after 2 links",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_custom_indent() {
        let renderer = Renderer::new(RenderConfig::default().with_indent("\t"));
        assert_eq!(
            renderer.render(&chain_of(2)),
            "\tfailing property: \"p0\" of type Person\n\t\tfailing property: \"p1\" of type Person\n\n\t\t\tCould not parse Date from this value: x"
        );
    }
}
