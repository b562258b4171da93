//! Item key parsing
//!
//! Parses agent item keys of the form `key` or `key[param1,"param 2",...]`.

use std::fmt;
use std::str::FromStr;

use crate::vfs::error::KeyError;

/// A parsed item key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    pub key: String,
    pub params: Vec<String>,
}

impl ItemKey {
    pub fn new(key: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            key: key.into(),
            params,
        }
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

impl FromStr for ItemKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();

        let mut pos = 0;
        while pos < chars.len() && is_key_char(chars[pos]) {
            pos += 1;
        }
        if pos == 0 {
            return match chars.first() {
                None => Err(KeyError::Empty),
                Some(&ch) => Err(KeyError::InvalidKeyChar { ch, pos: 0 }),
            };
        }

        let key: String = chars[..pos].iter().collect();
        if pos == chars.len() {
            return Ok(ItemKey::new(key, Vec::new()));
        }
        if chars[pos] != '[' {
            return Err(KeyError::InvalidKeyChar {
                ch: chars[pos],
                pos,
            });
        }

        let (params, end) = parse_params(&chars, pos + 1)?;
        if end != chars.len() {
            return Err(KeyError::TrailingCharacters(end));
        }

        Ok(ItemKey::new(key, params))
    }
}

/// Parse parameters starting just after '['.
///
/// Returns the parameters and the position just after the closing ']'.
fn parse_params(chars: &[char], mut pos: usize) -> Result<(Vec<String>, usize), KeyError> {
    let mut params = Vec::new();

    loop {
        while pos < chars.len() && chars[pos] == ' ' {
            pos += 1;
        }

        let Some(&c) = chars.get(pos) else {
            return Err(KeyError::UnterminatedParams);
        };

        let param = match c {
            '"' => {
                let start = pos;
                let mut value = String::new();
                pos += 1;
                loop {
                    match chars.get(pos) {
                        None => return Err(KeyError::UnterminatedQuote(start)),
                        Some('\\') if chars.get(pos + 1) == Some(&'"') => {
                            value.push('"');
                            pos += 2;
                        }
                        Some('"') => {
                            pos += 1;
                            break;
                        }
                        Some(&other) => {
                            value.push(other);
                            pos += 1;
                        }
                    }
                }
                while pos < chars.len() && chars[pos] == ' ' {
                    pos += 1;
                }
                match chars.get(pos) {
                    None => return Err(KeyError::UnterminatedParams),
                    Some(',') | Some(']') => {}
                    Some(&ch) => return Err(KeyError::UnexpectedAfterQuote { ch, pos }),
                }
                value
            }
            '[' => return Err(KeyError::NestedArray(pos)),
            _ => {
                let mut value = String::new();
                loop {
                    match chars.get(pos) {
                        None => return Err(KeyError::UnterminatedParams),
                        Some(',') | Some(']') => break,
                        Some('"') => return Err(KeyError::QuoteInUnquoted(pos)),
                        Some(&other) => {
                            value.push(other);
                            pos += 1;
                        }
                    }
                }
                value
            }
        };

        params.push(param);

        // chars[pos] is ',' or ']' here
        if chars[pos] == ']' {
            return Ok((params, pos + 1));
        }
        pos += 1;
    }
}

/// Formats the key back into item key syntax.
///
/// Parameters containing `,` `[` `]` `"` or starting with a space are quoted.
/// Key syntax has no escape for a backslash, so a quoted parameter ending in
/// `\` does not parse back (`",\"` reads as an escaped quote). Unquoted
/// parameters ending in `\` are unaffected.
impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if self.params.is_empty() {
            return Ok(());
        }

        let quoted: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                if p.contains([',', ']', '"', '[']) || p.starts_with(' ') {
                    format!("\"{}\"", p.replace('"', "\\\""))
                } else {
                    p.clone()
                }
            })
            .collect();
        write!(f, "[{}]", quoted.join(","))
    }
}
