//! Static reference tables for the 114 surahs
//!
//! All tables are indexed by `surah_number - 1`.

/// Number of surahs in the Quran
pub const SURAH_COUNT: u16 = 114;

/// Number of pages in the standard printed (Madani) mushaf
pub const MUSHAF_PAGE_COUNT: u16 = 604;

/// Total number of verses across all surahs
pub const TOTAL_VERSES: u32 = 6236;

/// Verse count per surah
pub const VERSE_COUNTS: [u16; 114] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, // 1-10
    123, 111, 43, 52, 99, 128, 111, 110, 98, 135, // 11-20
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, // 21-30
    34, 30, 73, 54, 45, 83, 182, 88, 75, 85, // 31-40
    54, 53, 89, 59, 37, 35, 38, 29, 18, 45, // 41-50
    60, 49, 62, 55, 78, 96, 29, 22, 24, 13, // 51-60
    14, 11, 11, 18, 12, 12, 30, 52, 52, 44, // 61-70
    28, 28, 20, 56, 40, 31, 50, 40, 46, 42, // 71-80
    29, 19, 36, 25, 22, 17, 19, 26, 30, 20, // 81-90
    15, 21, 11, 8, 8, 19, 5, 8, 8, 11, // 91-100
    11, 8, 3, 9, 5, 4, 7, 3, 6, 3, // 101-110
    5, 4, 5, 6, // 111-114
];

/// Mushaf page on which each surah starts
pub const SURAH_START_PAGES: [u16; 114] = [
    1, 2, 50, 77, 106, 128, 151, 177, 187, 208, // 1-10
    221, 235, 249, 255, 262, 267, 282, 293, 305, 312, // 11-20
    322, 332, 342, 350, 359, 367, 377, 385, 396, 404, // 21-30
    411, 415, 418, 428, 434, 440, 446, 453, 458, 467, // 31-40
    477, 483, 489, 496, 499, 502, 507, 511, 515, 518, // 41-50
    520, 523, 526, 528, 531, 534, 537, 542, 545, 549, // 51-60
    551, 553, 554, 556, 558, 560, 562, 564, 566, 568, // 61-70
    570, 572, 574, 575, 577, 578, 580, 582, 583, 585, // 71-80
    586, 587, 587, 589, 590, 591, 591, 592, 593, 594, // 81-90
    595, 595, 596, 596, 597, 597, 598, 598, 599, 599, // 91-100
    600, 600, 601, 601, 601, 602, 602, 603, 603, 603, // 101-110
    603, 604, 604, 604, // 111-114
];

/// Traditional chronological revelation order (Ibn Abbas / al-Zanjani sequence)
///
/// Entry `i` is the surah revealed `i + 1`-th.
pub const REVELATION_ORDER: [u16; 114] = [
    96, 68, 73, 74, 1, 111, 81, 87, 92, 89, //
    93, 94, 103, 100, 108, 102, 107, 109, 105, 113, //
    114, 112, 53, 80, 97, 91, 85, 95, 106, 101, //
    75, 104, 77, 50, 90, 86, 54, 38, 7, 72, //
    36, 25, 35, 19, 20, 56, 26, 27, 28, 17, //
    10, 11, 12, 15, 6, 37, 31, 34, 39, 40, //
    41, 42, 43, 44, 45, 46, 51, 88, 18, 16, //
    71, 14, 21, 23, 32, 52, 67, 69, 70, 78, //
    79, 82, 84, 30, 29, 83, 2, 8, 3, 33, //
    60, 4, 99, 57, 47, 13, 55, 76, 65, 98, //
    59, 24, 22, 63, 58, 49, 66, 64, 61, 62, //
    48, 5, 9, 110, //
];

/// Position of a surah in the revelation order (0-based), `None` if unknown
pub fn revelation_rank(surah: u16) -> Option<usize> {
    REVELATION_ORDER.iter().position(|&n| n == surah)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn verse_counts_sum_to_total() {
        let total: u32 = VERSE_COUNTS.iter().map(|&c| u32::from(c)).sum();
        assert_eq!(total, TOTAL_VERSES);
    }

    #[test]
    fn start_pages_are_monotonic_and_in_range() {
        assert_eq!(SURAH_START_PAGES[0], 1);
        for pair in SURAH_START_PAGES.windows(2) {
            assert!(pair[0] <= pair[1], "pages go backwards: {:?}", pair);
        }
        assert!(SURAH_START_PAGES.iter().all(|&p| p <= MUSHAF_PAGE_COUNT));
    }

    #[test]
    fn revelation_order_is_a_permutation() {
        let unique: HashSet<u16> = REVELATION_ORDER.iter().copied().collect();
        assert_eq!(unique.len(), 114);
        assert!(unique.iter().all(|&n| (1..=SURAH_COUNT).contains(&n)));
    }

    #[test]
    fn revelation_rank_lookup() {
        assert_eq!(revelation_rank(96), Some(0));
        assert_eq!(revelation_rank(1), Some(4));
        assert_eq!(revelation_rank(110), Some(113));
        assert_eq!(revelation_rank(0), None);
    }
}
