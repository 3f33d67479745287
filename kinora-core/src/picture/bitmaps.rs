//! Built-in bitmaps
//!
//! Each row is one angular step: `[upper, lower]` bank bytes. Bit 7 of the
//! upper byte is the outermost LED, bit 0 of the lower byte the innermost.
//! Rows are painted in order, one per step tick; the cursor wraps after
//! the last row and is not realigned to the rotation mark.
//!
//! The tables are generated at compile time.

use super::BankRow;

/// Angular steps per rotation for the one-degree pictures
pub const BUILTIN_RESOLUTION: usize = 360;

/// Angular steps per rotation for the starburst (five degrees per step)
pub const STARBURST_RESOLUTION: usize = 72;

const ALL_ON: BankRow = [0xFF, 0xFF];

/// Filled half disc
pub static HALF_WHEEL: [BankRow; BUILTIN_RESOLUTION] = half_wheel();

/// Clock face showing ten past ten
pub static CLOCK_FACE: [BankRow; BUILTIN_RESOLUTION] = clock_face();

/// Rays of alternating length around a hub ring
pub static STARBURST: [BankRow; STARBURST_RESOLUTION] = starburst();

const fn half_wheel() -> [BankRow; BUILTIN_RESOLUTION] {
    let mut rows = [[0u8; 2]; BUILTIN_RESOLUTION];
    let mut step = 0;
    while step < BUILTIN_RESOLUTION / 2 {
        rows[step] = ALL_ON;
        step += 1;
    }
    rows
}

const fn clock_face() -> [BankRow; BUILTIN_RESOLUTION] {
    const RIM: u8 = 0x80;
    const HOUR_MARK: u8 = 0xF0;
    // One degree per step: minute hand on 2, hour hand on 10
    const MINUTE_HAND: usize = 60;
    const HOUR_HAND: usize = 300;

    let mut rows = [[0u8; 2]; BUILTIN_RESOLUTION];
    let mut step = 0;
    while step < BUILTIN_RESOLUTION {
        let mut upper = RIM;
        let mut lower = 0;
        if step % 30 == 0 {
            upper = HOUR_MARK;
        }
        if step == 0 {
            // Long mark at twelve
            upper = 0xFF;
        }
        if step == MINUTE_HAND {
            upper = 0x7F;
            lower = 0xFF;
        }
        if step == HOUR_HAND {
            upper |= 0x07;
            lower = 0xFF;
        }
        rows[step] = [upper, lower];
        step += 1;
    }
    rows
}

const fn starburst() -> [BankRow; STARBURST_RESOLUTION] {
    const HUB_RING: u8 = 0x01;
    let mut rows = [[0u8; 2]; STARBURST_RESOLUTION];
    let mut step = 0;
    while step < STARBURST_RESOLUTION {
        // Long ray every 20 degrees, short ray halfway between
        rows[step] = match step % 4 {
            0 => ALL_ON,
            2 => [0x0F, 0xFF],
            _ => [0x00, HUB_RING],
        };
        step += 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_wheel() {
        assert_eq!(HALF_WHEEL[0], ALL_ON);
        assert_eq!(HALF_WHEEL[179], ALL_ON);
        assert_eq!(HALF_WHEEL[180], [0, 0]);
        assert_eq!(HALF_WHEEL[359], [0, 0]);
    }

    #[test]
    fn test_clock_face_marks() {
        assert_eq!(CLOCK_FACE[0], [0xFF, 0x00]);
        assert_eq!(CLOCK_FACE[90], [0xF0, 0x00]);
        assert_eq!(CLOCK_FACE[1], [0x80, 0x00]);

        // Hands reach into the inner bank
        assert_eq!(CLOCK_FACE[60], [0x7F, 0xFF]);
        assert_eq!(CLOCK_FACE[300], [0xF7, 0xFF]);
    }

    #[test]
    fn test_starburst_rays() {
        let long_rays = STARBURST.iter().filter(|row| **row == ALL_ON).count();
        assert_eq!(long_rays, 360 / 20);
        assert_eq!(STARBURST[2], [0x0F, 0xFF]);
        assert!(STARBURST.iter().all(|row| row[1] & 0x01 != 0));
    }
}
