//! # Size Module
//!
//! Integer-only size formatting for reports.

const MIB: u64 = 1024 * 1024;

/// Bytes as mebibytes with two decimals, rounded half up (`"1.50"`).
#[must_use]
pub fn format_megabytes(bytes: u64) -> String {
    let hundredths = (u128::from(bytes) * 100 + u128::from(MIB / 2)) / u128::from(MIB);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_megabytes(0), "0.00");
        assert_eq!(format_megabytes(MIB), "1.00");
        assert_eq!(format_megabytes(MIB + MIB / 2), "1.50");
        assert_eq!(format_megabytes(10 * MIB + MIB / 4), "10.25");
        assert_eq!(format_megabytes(5_000), "0.00");
        assert_eq!(format_megabytes(6_000), "0.01");
    }
}
