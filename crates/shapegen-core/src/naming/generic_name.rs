use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A type name split into its base and top-level generic arguments.
///
/// `Map<String, List<Item>>` parses to base `Map` with arguments
/// `["String", "List<Item>"]`. Both `<>` and `[]` are accepted as bracket pairs;
/// nested arguments are kept verbatim and can be parsed again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericName {
    pub base_name: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenericNameError {
    #[error("missing type name in `{input}`")]
    EmptyName { input: String },

    #[error("unexpected `{found}` at offset {offset} in `{input}`")]
    Unbalanced {
        input: String,
        offset: usize,
        found: char,
    },

    #[error("unclosed generic argument list in `{input}`")]
    Unclosed { input: String },

    #[error("empty generic argument at position {position} in `{input}`")]
    EmptyArgument { input: String, position: usize },

    #[error("unexpected text after offset {offset} in `{input}`")]
    TrailingText { input: String, offset: usize },
}

impl GenericName {
    pub fn new(base_name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            base_name: base_name.into(),
            arguments,
        }
    }

    /// Parse `Base`, `Base<A, B>` or `Base[A, B]`.
    pub fn parse(input: &str) -> Result<Self, GenericNameError> {
        let text = input.trim();
        let Some(open_at) = text.find(['<', '[']) else {
            reject_stray(text, input, 0)?;
            if text.is_empty() {
                return Err(GenericNameError::EmptyName {
                    input: input.to_string(),
                });
            }
            return Ok(Self::new(text, Vec::new()));
        };

        let base = text[..open_at].trim();
        reject_stray(base, input, 0)?;
        if base.is_empty() {
            return Err(GenericNameError::EmptyName {
                input: input.to_string(),
            });
        }

        let mut stack: Vec<char> = Vec::new();
        let mut raw_args: Vec<&str> = Vec::new();
        let mut arg_start = open_at + 1;
        let mut closed_at = None;

        for (offset, c) in text.char_indices().skip_while(|(i, _)| *i < open_at) {
            if closed_at.is_some() {
                return Err(GenericNameError::TrailingText {
                    input: input.to_string(),
                    offset,
                });
            }
            match c {
                '<' | '[' => stack.push(c),
                '>' | ']' => {
                    let expected = match stack.pop() {
                        Some('<') => '>',
                        Some('[') => ']',
                        _ => {
                            return Err(GenericNameError::Unbalanced {
                                input: input.to_string(),
                                offset,
                                found: c,
                            });
                        }
                    };
                    if c != expected {
                        return Err(GenericNameError::Unbalanced {
                            input: input.to_string(),
                            offset,
                            found: c,
                        });
                    }
                    if stack.is_empty() {
                        raw_args.push(&text[arg_start..offset]);
                        closed_at = Some(offset);
                    }
                }
                ',' if stack.len() == 1 => {
                    raw_args.push(&text[arg_start..offset]);
                    arg_start = offset + 1;
                }
                _ => {}
            }
        }

        if closed_at.is_none() {
            return Err(GenericNameError::Unclosed {
                input: input.to_string(),
            });
        }

        // `Base<>` carries no arguments
        if raw_args.len() == 1 && raw_args[0].trim().is_empty() {
            return Ok(Self::new(base, Vec::new()));
        }

        let mut arguments = Vec::with_capacity(raw_args.len());
        for (position, arg) in raw_args.iter().enumerate() {
            let arg = arg.trim();
            if arg.is_empty() {
                return Err(GenericNameError::EmptyArgument {
                    input: input.to_string(),
                    position,
                });
            }
            arguments.push(arg.to_string());
        }

        Ok(Self::new(base, arguments))
    }

    pub fn is_generic(&self) -> bool {
        !self.arguments.is_empty()
    }
}

/// Closing brackets and commas are only legal inside an argument list.
fn reject_stray(segment: &str, input: &str, base_offset: usize) -> Result<(), GenericNameError> {
    match segment
        .char_indices()
        .find(|(_, c)| matches!(c, '>' | ']' | ','))
    {
        Some((offset, found)) => Err(GenericNameError::Unbalanced {
            input: input.to_string(),
            offset: base_offset + offset,
            found,
        }),
        None => Ok(()),
    }
}

impl FromStr for GenericName {
    type Err = GenericNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GenericName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_name)?;
        if !self.arguments.is_empty() {
            write!(f, "<{}>", self.arguments.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Class", "Class", &[])]
    #[case("Class<>", "Class", &[])]
    #[case("Class<T1, T2>", "Class", &["T1", "T2"])]
    #[case("Class[T1, T2]", "Class", &["T1", "T2"])]
    #[case("Class[T1[T2], T3]", "Class", &["T1[T2]", "T3"])]
    #[case("Class<T1<T2>, T3>", "Class", &["T1<T2>", "T3"])]
    #[case("  Map< String ,List<Item> >  ", "Map", &["String", "List<Item>"])]
    #[case("Outer<Map<K, V>, List<T>>", "Outer", &["Map<K, V>", "List<T>"])]
    #[case("com.acme.Box$Inner<T>", "com.acme.Box$Inner", &["T"])]
    fn test_parse_valid(#[case] input: &str, #[case] base: &str, #[case] args: &[&str]) {
        let parsed = GenericName::parse(input).unwrap();
        assert_eq!(parsed.base_name, base);
        assert_eq!(parsed.arguments, args);
    }

    #[rstest]
    #[case("")]
    #[case("<T>")]
    #[case("Class<T")]
    #[case("Class<T]")]
    #[case("Class<T>>")]
    #[case("Class>T<")]
    #[case("Class<T, >")]
    #[case("Class<, T>")]
    #[case("A, B")]
    #[case("Class<T> trailing")]
    fn test_parse_malformed(#[case] input: &str) {
        assert!(GenericName::parse(input).is_err(), "{input} should not parse");
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            GenericName::parse("Class<T"),
            Err(GenericNameError::Unclosed { .. })
        ));
        assert!(matches!(
            GenericName::parse("Class<T]"),
            Err(GenericNameError::Unbalanced { found: ']', .. })
        ));
        assert!(matches!(
            GenericName::parse("Class<T, >"),
            Err(GenericNameError::EmptyArgument { position: 1, .. })
        ));
    }

    #[test]
    fn test_display_normalizes_spacing() {
        let name: GenericName = "Map<K,V>".parse().unwrap();
        assert_eq!(name.to_string(), "Map<K, V>");
        assert!(name.is_generic());
    }

    #[test]
    fn test_nested_argument_reparses() {
        let outer = GenericName::parse("Class<T1<T2>, T3>").unwrap();
        let inner = GenericName::parse(&outer.arguments[0]).unwrap();
        assert_eq!(inner, GenericName::new("T1", vec!["T2".to_string()]));
    }
}
