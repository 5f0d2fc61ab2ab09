// Multics calendar clock conversion.

use crate::words::Word36;

/// 1901-01-01 to 1970-01-01, in seconds.
const EPOCH_1901_TO_UNIX: i128 = 2_177_452_800;

/// The surviving pack images were written under emulation with the system
/// clock slid back 22 years (the OS cannot represent dates that far out);
/// slide the timestamps forward again so they land in a sane range.
const CLOCK_SLIDE_SECONDS: i128 = 1_438_644_783 - 744_420_783;

/// Convert a 36-bit timestamp word to Unix seconds.
///
/// The full calendar clock is a 52-bit count of microseconds since
/// 1901-01-01; the word stored in catalog entries is its top 36 bits, so
/// shift back up before dividing down to seconds.
pub fn multics_to_unix_seconds(w: Word36) -> i64 {
    let micros = (w as i128) << 16;
    let secs = micros / 1_000_000 - EPOCH_1901_TO_UNIX + CLOCK_SLIDE_SECONDS;
    secs as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_clock_lands_before_unix_epoch() {
        // An unset timestamp maps to 1901 plus the slide, well before 1970.
        assert!(multics_to_unix_seconds(0) < 0);
    }

    #[test]
    fn conversion_is_monotonic() {
        let a = multics_to_unix_seconds(0o400000000000);
        let b = multics_to_unix_seconds(0o400000010000);
        assert!(b > a);
    }
}
