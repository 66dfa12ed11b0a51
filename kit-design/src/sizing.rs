// Shirt sizes and the measurement guide shown next to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KitSize {
    Xs,
    S,
    #[default]
    M,
    L,
    Xl,
    Xxl,
}

/// Body measurements for one size, as printed on the size guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurements {
    pub chest: &'static str,
    pub length: &'static str,
    pub shoulders: &'static str,
}

impl KitSize {
    pub const ALL: [KitSize; 6] = [
        KitSize::Xs,
        KitSize::S,
        KitSize::M,
        KitSize::L,
        KitSize::Xl,
        KitSize::Xxl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KitSize::Xs => "XS",
            KitSize::S => "S",
            KitSize::M => "M",
            KitSize::L => "L",
            KitSize::Xl => "XL",
            KitSize::Xxl => "XXL",
        }
    }

    pub fn measurements(&self) -> Measurements {
        let (chest, length, shoulders) = match self {
            KitSize::Xs => ("81-86cm", "66cm", "42cm"),
            KitSize::S => ("86-91cm", "69cm", "44cm"),
            KitSize::M => ("91-97cm", "72cm", "46cm"),
            KitSize::L => ("97-102cm", "74cm", "49cm"),
            KitSize::Xl => ("102-107cm", "76cm", "52cm"),
            KitSize::Xxl => ("107-112cm", "78cm", "54cm"),
        };
        Measurements {
            chest,
            length,
            shoulders,
        }
    }
}

impl fmt::Display for KitSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for KitSize {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        KitSize::ALL
            .into_iter()
            .find(|size| size.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSize {
                label: s.to_string(),
            })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown kit size: {label:?} (expected XS, S, M, L, XL or XXL)")]
pub struct UnknownSize {
    pub label: String,
}
