//! Advisory validation for firewall table fields
//!
//! Entry constructors accept any values by contract; these checks exist for
//! the host tool to run before handing a table to the firewall programmer.
//! Hard errors flag values the hardware cannot represent, warnings flag values
//! that are representable but almost certainly unintended.

use crate::core::entry::{MidEntry, RegionSize};

/// Sanitizes a module/pm tag for safe embedding in line-oriented output.
///
/// Removes control characters, quotes, and shell metacharacters and caps the
/// result at 64 bytes (ASCII only). A tab or newline inside a tag would
/// corrupt the rendered table for downstream parsers.
///
/// # Examples
///
/// ```
/// use fwtable::validators::sanitize_tag;
///
/// assert_eq!(sanitize_tag("serial0"), "serial0");
///
/// let cleaned = sanitize_tag("bad\ttag\nhere");
/// assert!(!cleaned.contains('\t'));
/// assert!(!cleaned.contains('\n'));
/// ```
pub fn sanitize_tag(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | ':'))
        .take(64)
        .collect()
}

/// Validates and sanitizes a tag.
///
/// Empty tags are valid (`pm_tag` defaults to empty).
///
/// # Errors
///
/// Returns `Err` if:
/// - Tag exceeds 64 characters
/// - Tag becomes empty after sanitization (all invalid chars)
pub fn validate_tag(input: &str) -> Result<String, String> {
    if input.len() > 64 {
        return Err("Tag too long (max 64 characters)".to_string());
    }

    let sanitized = sanitize_tag(input);

    if sanitized.is_empty() && !input.is_empty() {
        return Err("Tag contains only invalid characters".to_string());
    }

    Ok(sanitized)
}

/// Validates a protected region against the address space.
///
/// Returns Ok(Some(warning)) for representable but suspicious regions.
///
/// # Errors
///
/// Returns `Err` if `base + size` overflows the 64-bit address space.
pub fn validate_region(base_addr: u64, size: RegionSize) -> Result<Option<String>, String> {
    match size {
        RegionSize::Unbounded => Ok(None),
        RegionSize::Bounded(0) => Ok(Some("Zero-sized region protects nothing".to_string())),
        RegionSize::Bounded(bytes) => {
            if base_addr.checked_add(bytes).is_none() {
                Err(format!(
                    "Region {base_addr:#x}+{bytes:#x} overflows the address space"
                ))
            } else {
                Ok(None)
            }
        }
    }
}

/// Checks a master-ID/mask pair and returns an informational warning.
///
/// This is informational only and does not block anything: the comparators
/// evaluate `(incoming & mask) == (smid & mask)`, so a zero mask matches every
/// master and ID bits outside the mask never participate.
pub fn check_mid(mid: &MidEntry) -> Option<String> {
    if mid.mask == 0 {
        return Some(format!("Mask 0x0 on {:#x} matches every master", mid.smid));
    }

    let stray = mid.smid & !mid.mask;
    if stray != 0 {
        return Some(format!(
            "ID bits {stray:#x} fall outside mask {:#x} and are ignored",
            mid.mask
        ));
    }

    None
}

/// Names the common protection aperture granule for a region size.
///
/// This is informational only and does not block saving.
pub fn check_aperture_size(size: RegionSize) -> Option<String> {
    let RegionSize::Bounded(bytes) = size else {
        return None;
    };

    match bytes {
        0x1000 => Some("4KB aperture".to_string()),
        0x10000 => Some("64KB aperture".to_string()),
        0x10_0000 => Some("1MB aperture".to_string()),
        b if b != 0 && !b.is_power_of_two() => Some(format!(
            "Size {b:#x} is not a power of two and spans partial apertures"
        )),
        _ => None,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_sanitize_tag_never_exceeds_64_chars(input in "\\PC*") {
            prop_assert!(sanitize_tag(&input).len() <= 64);
        }

        #[test]
        fn test_sanitize_tag_no_control_chars(input in "\\PC*") {
            prop_assert!(!sanitize_tag(&input).chars().any(char::is_control));
        }

        #[test]
        fn test_sanitize_tag_no_dangerous_chars(input in "\\PC*") {
            let sanitized = sanitize_tag(&input);
            prop_assert!(!sanitized.contains('"'));
            prop_assert!(!sanitized.contains('\''));
            prop_assert!(!sanitized.contains('$'));
            prop_assert!(!sanitized.contains('`'));
            prop_assert!(!sanitized.contains('\t'));
        }

        #[test]
        fn test_validate_region_overflow_consistency(
            base in any::<u64>(),
            bytes in 1u64..,
        ) {
            let result = validate_region(base, RegionSize::Bounded(bytes));
            if base.checked_add(bytes).is_none() {
                prop_assert!(result.is_err());
            } else {
                prop_assert!(result.is_ok());
            }
        }

        #[test]
        fn test_check_mid_clean_when_id_inside_mask(
            mask in 1u32..,
            smid in any::<u32>(),
        ) {
            let inside = MidEntry::new(smid & mask, mask);
            prop_assert!(check_mid(&inside).is_none());
        }
    }
}
