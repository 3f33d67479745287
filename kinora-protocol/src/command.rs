//! Command byte decoding

/// Byte selecting picture 0
pub const FIRST_PICTURE_BYTE: u8 = b'A';

/// Highest byte that selects a picture
pub const LAST_PICTURE_BYTE: u8 = b'Z';

/// Decoded serial command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Show the picture with this select index
    SelectPicture(u8),
    /// Byte with no meaning
    Unknown(u8),
}

impl Command {
    /// Decode one received byte
    ///
    /// Returns `None` for filler bytes (NUL, space, CR, LF) that terminal
    /// apps append to each command.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'\0' | b' ' | b'\r' | b'\n' => None,
            FIRST_PICTURE_BYTE..=LAST_PICTURE_BYTE => {
                Some(Command::SelectPicture(byte - FIRST_PICTURE_BYTE))
            }
            other => Some(Command::Unknown(other)),
        }
    }

    /// Byte that encodes this command
    pub fn to_byte(self) -> u8 {
        match self {
            Command::SelectPicture(index) => FIRST_PICTURE_BYTE.saturating_add(index),
            Command::Unknown(byte) => byte,
        }
    }
}

/// Decode a received buffer, skipping filler bytes
pub fn decode(bytes: &[u8]) -> impl Iterator<Item = Command> + '_ {
    bytes.iter().filter_map(|&byte| Command::from_byte(byte))
}
