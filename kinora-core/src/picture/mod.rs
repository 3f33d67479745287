//! Pictures and the picture selector
//!
//! The active picture is a tag over the closed set of built-in bitmaps
//! plus the angular-step cursor. Switching pictures always restarts the
//! cursor at row 0, so a column from the old bitmap is never mixed with
//! one from the new bitmap.

pub mod bitmaps;

pub use bitmaps::{BUILTIN_RESOLUTION, STARBURST_RESOLUTION};

/// One angular step of a bitmap: `[upper, lower]` bank bytes
pub type BankRow = [u8; 2];

/// Built-in pictures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PictureId {
    /// Filled half disc
    HalfWheel,
    /// Clock face
    ClockFace,
    /// Starburst
    Starburst,
}

impl PictureId {
    /// All pictures in select-index order
    pub const ALL: [PictureId; 3] = [
        PictureId::HalfWheel,
        PictureId::ClockFace,
        PictureId::Starburst,
    ];

    /// Look up a picture by select index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Select index of this picture
    pub fn index(self) -> u8 {
        match self {
            PictureId::HalfWheel => 0,
            PictureId::ClockFace => 1,
            PictureId::Starburst => 2,
        }
    }

    /// Bitmap rows, one per angular step
    pub fn bitmap(self) -> &'static [BankRow] {
        match self {
            PictureId::HalfWheel => &bitmaps::HALF_WHEEL,
            PictureId::ClockFace => &bitmaps::CLOCK_FACE,
            PictureId::Starburst => &bitmaps::STARBURST,
        }
    }

    /// Angular steps per rotation for this picture
    pub fn resolution(self) -> u16 {
        self.bitmap().len() as u16
    }
}

/// Result of a picture select request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectOutcome {
    /// Picture replaced and cursor reset
    Switched { from: PictureId, to: PictureId },
    /// Index not in the built-in set; picture left untouched
    Unknown(u8),
}

/// The picture being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Picture {
    id: PictureId,
    step: u16,
}

impl Picture {
    /// Start displaying `id` from row 0
    pub fn new(id: PictureId) -> Self {
        Self { id, step: 0 }
    }

    /// Picture currently selected
    pub fn id(&self) -> PictureId {
        self.id
    }

    /// Current angular-step cursor
    pub fn step(&self) -> u16 {
        self.step
    }

    /// Angular steps per rotation
    pub fn resolution(&self) -> u16 {
        self.id.resolution()
    }

    /// Bitmap row at the cursor
    pub fn current_row(&self) -> BankRow {
        self.id.bitmap()[self.step as usize]
    }

    /// Move the cursor to the next step, wrapping after the last row
    pub(crate) fn advance(&mut self) {
        self.step = (self.step + 1) % self.resolution();
    }
}

/// Switch to the picture with select index `picture_idx`
///
/// A known index replaces the picture and resets the cursor to 0, even if
/// it names the picture already shown. An unknown index changes nothing.
pub fn change_picture(picture_idx: u8, picture: &mut Picture) -> SelectOutcome {
    match PictureId::from_index(picture_idx) {
        Some(to) => {
            let from = picture.id;
            *picture = Picture::new(to);
            SelectOutcome::Switched { from, to }
        }
        None => SelectOutcome::Unknown(picture_idx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn picture_at(id: PictureId, step: u16) -> Picture {
        let mut picture = Picture::new(id);
        for _ in 0..step {
            picture.advance();
        }
        picture
    }

    #[test]
    fn test_index_roundtrip() {
        for id in PictureId::ALL {
            assert_eq!(PictureId::from_index(id.index()), Some(id));
        }
        assert_eq!(PictureId::from_index(3), None);
    }

    #[test]
    fn test_builtin_resolution() {
        assert_eq!(PictureId::HalfWheel.resolution() as usize, BUILTIN_RESOLUTION);
        assert_eq!(PictureId::ClockFace.resolution() as usize, BUILTIN_RESOLUTION);
        assert_eq!(PictureId::Starburst.resolution() as usize, STARBURST_RESOLUTION);
    }

    #[test]
    fn test_starburst_cursor_wraps_at_own_resolution() {
        let mut picture = picture_at(PictureId::Starburst, STARBURST_RESOLUTION as u16 - 1);
        picture.advance();
        assert_eq!(picture.step(), 0);
    }

    #[test]
    fn test_switch_resets_step() {
        let mut picture = picture_at(PictureId::HalfWheel, 42);
        assert_eq!(picture.step(), 42);

        let outcome = change_picture(1, &mut picture);
        assert_eq!(
            outcome,
            SelectOutcome::Switched {
                from: PictureId::HalfWheel,
                to: PictureId::ClockFace,
            }
        );
        assert_eq!(picture.id(), PictureId::ClockFace);
        assert_eq!(picture.step(), 0);
    }

    #[test]
    fn test_reselect_same_picture_resets_step() {
        let mut picture = picture_at(PictureId::Starburst, 7);
        change_picture(2, &mut picture);
        assert_eq!(picture.id(), PictureId::Starburst);
        assert_eq!(picture.step(), 0);
    }

    #[test]
    fn test_unknown_index_is_noop() {
        let mut picture = picture_at(PictureId::HalfWheel, 5);

        let outcome = change_picture(3, &mut picture);
        assert_eq!(outcome, SelectOutcome::Unknown(3));
        assert_eq!(picture.id(), PictureId::HalfWheel);
        assert_eq!(picture.step(), 5);
    }

    #[test]
    fn test_advance_wraps() {
        let mut picture = picture_at(PictureId::HalfWheel, 359);
        picture.advance();
        assert_eq!(picture.step(), 0);
    }

    proptest! {
        #[test]
        fn prop_full_cycle_returns_to_start(start in 0u16..360) {
            let mut picture = picture_at(PictureId::ClockFace, start);
            let resolution = picture.resolution();
            for _ in 0..resolution {
                let previous = picture.step();
                picture.advance();
                prop_assert_eq!(picture.step(), (previous + 1) % resolution);
            }
            prop_assert_eq!(picture.step(), start);
        }

        #[test]
        fn prop_any_known_select_resets(start in 0u16..360, idx in 0u8..3) {
            let mut picture = picture_at(PictureId::Starburst, start);
            let outcome = change_picture(idx, &mut picture);
            let switched = matches!(outcome, SelectOutcome::Switched { .. });
            prop_assert!(switched);
            prop_assert_eq!(picture.step(), 0);
        }

        #[test]
        fn prop_unknown_select_keeps_state(start in 0u16..360, idx in 3u8..=255) {
            let mut picture = picture_at(PictureId::HalfWheel, start);
            let before = picture;
            prop_assert_eq!(change_picture(idx, &mut picture), SelectOutcome::Unknown(idx));
            prop_assert_eq!(picture, before);
        }
    }
}
