use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Material of a single foxel.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Foxel {
    #[default]
    Air = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
    RG = 4,
    GB = 5,
    RB = 6,
    Black = 7,
    White = 8,

    Invalid = 255,
}

impl Foxel {
    pub fn is_transparent(&self) -> bool {
        matches!(self, Foxel::Air)
    }

    /// Display colour. Air has none.
    pub fn color(&self) -> Option<Color> {
        let (t, f) = (1.0, 0.0);
        let [r, g, b] = match self {
            Foxel::Air => return None,
            Foxel::Red => [t, f, f],
            Foxel::Green => [f, t, f],
            Foxel::Blue => [f, f, t],
            Foxel::RG => [t, t, f],
            Foxel::GB => [f, t, t],
            Foxel::RB => [t, f, t],
            Foxel::Black => [f, f, f],
            Foxel::White | Foxel::Invalid => [t, t, t],
        };
        Some(Color::srgb(r, g, b))
    }

    pub fn encode(self) -> u8 {
        self as u8
    }

    /// Unknown bytes decode to [`Foxel::Invalid`].
    pub fn decode(byte: u8) -> Foxel {
        match byte {
            0 => Foxel::Air,
            1 => Foxel::Red,
            2 => Foxel::Green,
            3 => Foxel::Blue,
            4 => Foxel::RG,
            5 => Foxel::GB,
            6 => Foxel::RB,
            7 => Foxel::Black,
            8 => Foxel::White,
            _ => Foxel::Invalid,
        }
    }
}
