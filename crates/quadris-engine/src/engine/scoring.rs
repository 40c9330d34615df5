use std::time::Duration;

/// Points for clearing N lines in one lock event, before the level
/// multiplier: single, double, triple, quadruple.
const LINE_CLEAR_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per cell of player-initiated soft drop.
pub const SOFT_DROP_POINTS_PER_CELL: u32 = 1;
/// Points per cell of hard drop.
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

const BASE_FALL_MILLIS: u64 = 400;
const FALL_SPEEDUP_MILLIS_PER_LEVEL: u64 = 30;
const MIN_FALL_MILLIS: u64 = 100;

/// Points awarded for clearing `cleared_lines` lines at the given level.
///
/// 1 line → 40·level, 2 → 100·level, 3 → 300·level, 4 → 1200·level.
/// `level` is the level in force when the piece locked, before any level-up
/// the clear itself triggers.
#[must_use]
pub fn line_clear_points(cleared_lines: usize, level: u32) -> u32 {
    LINE_CLEAR_POINTS[cleared_lines] * level
}

/// Level reached after clearing `lines_cleared` lines in total.
///
/// Starts at 1; every 10 cumulative lines advance one level.
#[must_use]
pub fn level_for_lines(lines_cleared: u32) -> u32 {
    1 + lines_cleared / 10
}

/// Interval between gravity ticks at the given level.
///
/// Starts at 400 ms and shrinks by 30 ms per level above 1, with a 100 ms
/// floor. The external tick source reschedules itself from this after every
/// level change; the engine does not schedule its own ticks.
#[must_use]
pub fn fall_interval(level: u32) -> Duration {
    let speedup = u64::from(level.saturating_sub(1)) * FALL_SPEEDUP_MILLIS_PER_LEVEL;
    Duration::from_millis(BASE_FALL_MILLIS.saturating_sub(speedup).max(MIN_FALL_MILLIS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points_scale_with_level() {
        assert_eq!(line_clear_points(0, 3), 0);
        assert_eq!(line_clear_points(1, 1), 40);
        assert_eq!(line_clear_points(2, 1), 100);
        assert_eq!(line_clear_points(3, 1), 300);
        assert_eq!(line_clear_points(4, 1), 1200);
        assert_eq!(line_clear_points(1, 5), 200);
        assert_eq!(line_clear_points(4, 2), 2400);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(23), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_fall_interval_shrinks_to_floor() {
        assert_eq!(fall_interval(1), Duration::from_millis(400));
        assert_eq!(fall_interval(2), Duration::from_millis(370));
        assert_eq!(fall_interval(11), Duration::from_millis(100));
        // Clamped at the floor from then on.
        assert_eq!(fall_interval(12), Duration::from_millis(100));
        assert_eq!(fall_interval(u32::MAX), Duration::from_millis(100));
    }
}
