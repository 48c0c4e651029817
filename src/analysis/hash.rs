/// Address used for hashing when a listing has none.
pub const UNKNOWN_ADDRESS: &str = "Unknown";

/// Rolling 32-bit hash over the UTF-16 code units of `address`:
/// `h = h * 31 + unit`, wrapping, then the absolute value.
///
/// Everything geography-dependent in the analysis derives from this, so
/// a given address always lands in the same "neighbourhood".
pub fn address_hash(address: &str) -> u32 {
    address
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
        .unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_address_hashes_to_zero() {
        assert_eq!(address_hash(""), 0);
    }

    #[test]
    fn matches_java_style_string_hash() {
        // "abc".hashCode() == 96354
        assert_eq!(address_hash("abc"), 96354);
        assert_eq!(address_hash(UNKNOWN_ADDRESS), address_hash("Unknown"));
    }

    #[test]
    fn wraps_like_a_32_bit_integer() {
        // "polygenelubricants".hashCode() == i32::MIN
        assert_eq!(address_hash("polygenelubricants"), 2_147_483_648);
    }
}
