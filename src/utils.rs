//! Numeric parsing helpers shared by the CLI and table deserialization.

/// Parses an unsigned integer from decimal or `0x`/`0X` hexadecimal notation.
///
/// # Errors
///
/// Returns `Err` if the input is not a valid number in either notation.
pub fn parse_hex(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    let parsed = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else {
        trimmed.parse::<u64>()
    };
    parsed.map_err(|_| format!("invalid number: '{input}'"))
}

/// [`parse_hex`] narrowed to 32-bit ids.
///
/// # Errors
///
/// Returns `Err` if the input is not a valid number or exceeds `u32::MAX`.
pub fn parse_hex_u32(input: &str) -> Result<u32, String> {
    let value = parse_hex(input)?;
    u32::try_from(value).map_err(|_| format!("value out of range for a 32-bit id: '{input}'"))
}
