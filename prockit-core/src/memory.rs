//! Memory-size string arithmetic.
//!
//! Sizes use the textual form accepted by sort-like utilities: an integer
//! magnitude with an optional single-character unit (`10G`, `500M`, `50%`,
//! or bare bytes like `10000`). [`divide_memory`] splits such a size evenly
//! across partitions, dropping to a finer unit when the division is not
//! exact so that no partition silently rounds to nothing.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A parsed memory-size string: non-negative magnitude plus optional
/// single-character unit, kept verbatim from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySize {
    pub value: u64,
    pub unit: Option<char>,
}

impl FromStr for MemorySize {
    type Err = CoreError;

    /// Parses `<integer><unit>`. The unit is the last character when it is
    /// not a digit, otherwise the whole string is a bare byte count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let last = s
            .chars()
            .last()
            .ok_or_else(|| CoreError::MemoryParse(s.to_string()))?;
        if last.is_ascii_digit() {
            let value = s.parse().map_err(|_| CoreError::MemoryParse(s.to_string()))?;
            Ok(Self { value, unit: None })
        } else {
            let magnitude = &s[..s.len() - last.len_utf8()];
            let value = magnitude
                .parse()
                .map_err(|_| CoreError::MemoryParse(s.to_string()))?;
            Ok(Self {
                value,
                unit: Some(last),
            })
        }
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{}{}", self.value, unit),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Divides a memory-size string evenly among `n` partitions.
///
/// An exact division keeps the original unit. An inexact one is retried one
/// unit finer (1024 per step): no unit or `K` goes to bytes (`b`), `M` to
/// `K`, `G` to `M`. Sizes already at byte or percent scale cannot be
/// refined; those yield [`CoreError::MemoryTooSmall`] when the quotient
/// would be zero, and any other unit yields [`CoreError::MemoryFormat`].
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn divide_memory(total: &str, n: u64) -> CoreResult<String> {
    let size: MemorySize = total.parse()?;
    let quotient = size.value / n;
    if quotient * n == size.value {
        return Ok(MemorySize {
            value: quotient,
            unit: size.unit,
        }
        .to_string());
    }

    let refined = |unit| {
        MemorySize {
            value: size.value * 1024 / n,
            unit: Some(unit),
        }
        .to_string()
    };
    match size.unit {
        None | Some('K') | Some('k') => Ok(refined('b')),
        Some('M') | Some('m') => Ok(refined('K')),
        Some('G') | Some('g') => Ok(refined('M')),
        Some(unit @ ('B' | 'b' | '%')) if quotient == 0 => Err(CoreError::MemoryTooSmall {
            n,
            per_partition: format!("{}{}", size.value as f64 / n as f64, unit),
        }),
        _ => Err(CoreError::MemoryFormat(total.to_string())),
    }
}
