//! Offset unit conversion
//!
//! Callers often count characters in UTF-16 code units, where characters
//! outside the Basic Multilingual Plane (most emoji) take two units, or in
//! UTF-8 bytes. Internally every offset is a Unicode scalar value (codepoint)
//! index. The converter is built once per text and answers lookups in both
//! directions in O(1).
//!
//! ```text
//! text      a    😀         b
//! utf16     0    1    2     3    4
//! internal  0    1          2    3
//! ```
//!
//! External index 2 addresses the low surrogate of 😀 and is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OffsetError;
use crate::model::Offset;

/// Unit in which external offsets are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetUnit {
    /// Unicode scalar values
    #[default]
    Codepoint,
    /// UTF-16 code units
    Utf16,
    /// UTF-8 bytes
    Utf8,
}

impl OffsetUnit {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetUnit::Codepoint => "codepoint",
            OffsetUnit::Utf16 => "utf16",
            OffsetUnit::Utf8 => "utf8",
        }
    }

    /// Number of units `ch` occupies
    pub fn width(&self, ch: char) -> usize {
        match self {
            OffsetUnit::Codepoint => 1,
            OffsetUnit::Utf16 => ch.len_utf16(),
            OffsetUnit::Utf8 => ch.len_utf8(),
        }
    }
}

impl fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OffsetUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "codepoint" | "char" | "utf32" => Ok(OffsetUnit::Codepoint),
            "utf16" | "utf-16" => Ok(OffsetUnit::Utf16),
            "utf8" | "utf-8" | "byte" | "bytes" => Ok(OffsetUnit::Utf8),
            other => Err(format!("unknown offset unit: {other}")),
        }
    }
}

/// Bidirectional offset mapping for one text
#[derive(Debug, Clone)]
pub struct OffsetConverter<'t> {
    text: &'t str,
    unit: OffsetUnit,
    char_count: usize,
    /// External index -> internal index; `None` marks a position inside a
    /// character. Empty for codepoint units.
    ext_to_int: Vec<Option<usize>>,
    /// Internal index -> external index. Empty for codepoint units.
    int_to_ext: Vec<usize>,
    /// Internal index -> byte index, one past the end included
    int_to_byte: Vec<usize>,
}

impl<'t> OffsetConverter<'t> {
    /// Precompute the mapping for `text`
    pub fn new(text: &'t str, unit: OffsetUnit) -> Self {
        let mapped = unit != OffsetUnit::Codepoint;
        let mut int_to_byte = Vec::with_capacity(text.len() + 1);
        let mut ext_to_int = Vec::new();
        let mut int_to_ext = Vec::new();
        if mapped {
            ext_to_int.reserve(text.len() + 1);
            int_to_ext.reserve(text.len() + 1);
        }

        let mut char_count = 0;
        for (byte, ch) in text.char_indices() {
            int_to_byte.push(byte);
            if mapped {
                int_to_ext.push(ext_to_int.len());
                ext_to_int.push(Some(char_count));
                for _ in 1..unit.width(ch) {
                    ext_to_int.push(None);
                }
            }
            char_count += 1;
        }

        int_to_byte.push(text.len());
        if mapped {
            int_to_ext.push(ext_to_int.len());
            ext_to_int.push(Some(char_count));
        }

        Self {
            text,
            unit,
            char_count,
            ext_to_int,
            int_to_ext,
            int_to_byte,
        }
    }

    /// The text this converter was built for
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// External unit
    pub fn unit(&self) -> OffsetUnit {
        self.unit
    }

    /// Length of the text in codepoints
    pub fn char_len(&self) -> usize {
        self.char_count
    }

    /// Length of the text in the external unit
    pub fn external_len(&self) -> usize {
        match self.unit {
            OffsetUnit::Codepoint => self.char_count,
            OffsetUnit::Utf16 | OffsetUnit::Utf8 => self.ext_to_int.len() - 1,
        }
    }

    /// Map an external index to a codepoint index
    pub fn external_to_internal(&self, offset: usize) -> Result<usize, OffsetError> {
        match self.unit {
            OffsetUnit::Codepoint => {
                if offset <= self.char_count {
                    Ok(offset)
                } else {
                    Err(OffsetError::OutOfBounds {
                        offset,
                        len: self.char_count,
                    })
                }
            }
            OffsetUnit::Utf16 | OffsetUnit::Utf8 => match self.ext_to_int.get(offset) {
                Some(Some(index)) => Ok(*index),
                Some(None) if self.unit == OffsetUnit::Utf16 => {
                    Err(OffsetError::SurrogateSplit { offset })
                }
                Some(None) => Err(OffsetError::CharBoundary { offset }),
                None => Err(OffsetError::OutOfBounds {
                    offset,
                    len: self.external_len(),
                }),
            },
        }
    }

    /// Map a codepoint index to an external index
    pub fn internal_to_external(&self, index: usize) -> Result<usize, OffsetError> {
        let out_of_bounds = OffsetError::OutOfBounds {
            offset: index,
            len: self.char_count,
        };
        match self.unit {
            OffsetUnit::Codepoint if index <= self.char_count => Ok(index),
            OffsetUnit::Codepoint => Err(out_of_bounds),
            OffsetUnit::Utf16 | OffsetUnit::Utf8 => {
                self.int_to_ext.get(index).copied().ok_or(out_of_bounds)
            }
        }
    }

    /// Map a codepoint index to a byte index into the text
    pub fn internal_to_byte(&self, index: usize) -> Result<usize, OffsetError> {
        self.int_to_byte
            .get(index)
            .copied()
            .ok_or(OffsetError::OutOfBounds {
                offset: index,
                len: self.char_count,
            })
    }

    /// Map an external range to a codepoint range
    pub fn convert_offset(&self, offset: Offset) -> Result<Offset, OffsetError> {
        if offset.begin > offset.end {
            return Err(OffsetError::Inverted {
                begin: offset.begin,
                end: offset.end,
            });
        }
        Ok(Offset::new(
            self.external_to_internal(offset.begin)?,
            self.external_to_internal(offset.end)?,
        ))
    }

    /// Map a codepoint range back to the external unit
    pub fn externalize(&self, offset: Offset) -> Result<Offset, OffsetError> {
        Ok(Offset::new(
            self.internal_to_external(offset.begin)?,
            self.internal_to_external(offset.end)?,
        ))
    }

    /// Slice the text by a codepoint range
    pub fn slice(&self, range: Offset) -> Result<&'t str, OffsetError> {
        if range.begin > range.end {
            return Err(OffsetError::Inverted {
                begin: range.begin,
                end: range.end,
            });
        }
        let begin = self.internal_to_byte(range.begin)?;
        let end = self.internal_to_byte(range.end)?;
        Ok(&self.text[begin..end])
    }
}
