//! Seven-segment glyph tables for the ClockIt display.
//!
//! Bit `n` of a pattern drives segment line `n`: A is bit 0 through G at bit 6, and the
//! decimal point is bit 7. The letter shapes are the mixed-case ClockIt font (`b`, `d`, `h`,
//! `r`, ...), so the same pattern is used for upper- and lowercase input.

/// Constants for the 7-segment display.
pub struct Leds;

impl Leds {
    /// Segment A of the 7-segment display.
    pub const SEG_A: u8 = 0b_0000_0001;
    /// Segment B of the 7-segment display.
    pub const SEG_B: u8 = 0b_0000_0010;
    /// Segment C of the 7-segment display.
    pub const SEG_C: u8 = 0b_0000_0100;
    /// Segment D of the 7-segment display.
    pub const SEG_D: u8 = 0b_0000_1000;
    /// Segment E of the 7-segment display.
    pub const SEG_E: u8 = 0b_0001_0000;
    /// Segment F of the 7-segment display.
    pub const SEG_F: u8 = 0b_0010_0000;
    /// Segment G of the 7-segment display.
    pub const SEG_G: u8 = 0b_0100_0000;
    /// Decimal point of the 7-segment display.
    pub const DECIMAL: u8 = 0b_1000_0000;

    /// Nothing lit.
    pub const BLANK: u8 = 0b_0000_0000;

    /// Both colon dots. Only meaningful on the indicator slot, whose A and B lines feed the colon.
    pub const COLON: u8 = Self::SEG_A | Self::SEG_B;

    /// The AM dot. Only meaningful on the indicator slot, whose C line feeds the dot beside digit 3.
    pub const AM_DOT: u8 = Self::SEG_C;

    /// The alarm-armed dot: the decimal point of digit 4.
    pub const ALARM_DOT: u8 = Self::DECIMAL;

    /// Array representing the segments for digits 0-9 on a 7-segment display.
    pub const DIGITS: [u8; 10] = [
        0b_0011_1111, // Digit 0
        0b_0000_0110, // Digit 1
        0b_0101_1011, // Digit 2
        0b_0100_1111, // Digit 3
        0b_0110_0110, // Digit 4
        0b_0110_1101, // Digit 5
        0b_0111_1101, // Digit 6
        0b_0000_0111, // Digit 7
        0b_0111_1111, // Digit 8
        0b_0110_1111, // Digit 9
    ];

    /// Letters A-Z.
    pub const LETTERS: [u8; 26] = [
        0b_0111_0111, // A
        0b_0111_1100, // b
        0b_0011_1001, // C
        0b_0101_1110, // d
        0b_0111_1001, // E
        0b_0111_0001, // F
        0b_0011_1101, // G
        0b_0111_0110, // h
        0b_0011_0000, // i
        0b_0001_1110, // J
        0b_0111_0101, // k
        0b_0011_1000, // L
        0b_0010_1011, // M
        0b_0011_0111, // N
        0b_0101_1100, // o
        0b_0111_0011, // P
        0b_0110_0111, // q
        0b_0011_0001, // r
        0b_0110_0100, // s
        0b_0111_1000, // t
        0b_0011_1110, // U
        0b_0010_1010, // v
        0b_0001_1101, // w
        0b_0100_1001, // x
        0b_0110_1110, // Y
        0b_0101_0010, // z
    ];

    /// Hyphen.
    pub const HYPHEN: u8 = Self::SEG_G;

    /// Apostrophe.
    pub const APOSTROPHE: u8 = Self::SEG_B;

    /// Segments for a single decimal digit. Values above 9 render blank.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "The match arm bounds the index to the table")]
    pub const fn digit(value: u8) -> u8 {
        match value {
            0..=9 => Self::DIGITS[value as usize],
            _ => Self::BLANK,
        }
    }

    /// Segments for a text character. Anything outside `A-Z`, `a-z`, `0-9`, `-`, and `'`
    /// renders blank.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Each match arm bounds the offset to its table"
    )]
    pub const fn character(character: char) -> u8 {
        match character {
            'A'..='Z' => Self::LETTERS[(character as u8 - b'A') as usize],
            'a'..='z' => Self::LETTERS[(character as u8 - b'a') as usize],
            '0'..='9' => Self::DIGITS[(character as u8 - b'0') as usize],
            '-' => Self::HYPHEN,
            '\'' => Self::APOSTROPHE,
            _ => Self::BLANK,
        }
    }
}
