//! Memory size parsing
//!
//! Sizes are written as `<digits><unit>` with decimal multipliers:
//! `kb` = 1000, `mb` = 1000^2, `gb` = 1000^3 (case-insensitive).

use regex::Regex;
use std::sync::LazyLock;

use crate::error::UnitsError;

static MEMORY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)([a-zA-Z]+)").expect("valid memory regex"));

const KB: u64 = 1000;
const MB: u64 = KB * 1000;
const GB: u64 = MB * 1000;

/// Parse a memory size such as `1024mb` into bytes.
///
/// Only the first `<digits><letters>` run is considered. Text around it is
/// ignored, which is logged as a warning so the user notices.
pub fn parse_memory(input: &str) -> Result<u64, UnitsError> {
    let captures = MEMORY_REGEX
        .captures(input)
        .ok_or_else(|| UnitsError::Unparseable(input.to_string()))?;

    if let Some(whole) = captures.get(0).filter(|m| m.len() != input.len()) {
        let ignored = format!("{}{}", &input[..whole.start()], &input[whole.end()..]);
        tracing::warn!(
            input = %input,
            used = %whole.as_str(),
            ignored = %ignored,
            "Ignoring text around memory size; only the first <number><unit> is used"
        );
    }

    let digits = &captures[1];
    let unit = &captures[2];

    let multiplier = match unit.to_ascii_lowercase().as_str() {
        "kb" => KB,
        "mb" => MB,
        "gb" => GB,
        _ => {
            return Err(UnitsError::UnknownUnit {
                unit: unit.to_string(),
            })
        }
    };

    digits
        .parse::<u64>()
        .ok()
        .and_then(|size| size.checked_mul(multiplier))
        .ok_or_else(|| UnitsError::Overflow(input.to_string()))
}

/// Render a byte count in the largest unit that divides it exactly.
///
/// The output is accepted by [`parse_memory`] whenever it ends in a
/// kb/mb/gb unit.
pub fn format_memory(bytes: u64) -> String {
    match bytes {
        0 => "0".to_string(),
        b if b % GB == 0 => format!("{}gb", b / GB),
        b if b % MB == 0 => format!("{}mb", b / MB),
        b if b % KB == 0 => format!("{}kb", b / KB),
        b => format!("{}b", b),
    }
}
