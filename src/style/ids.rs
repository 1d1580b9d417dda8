use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! style_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u16);

        impl $name {
            #[must_use]
            pub const fn new(raw: u16) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn raw(self) -> u16 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

style_id!(
    /// Selects a stroke from the renderer palette.
    PenId
);
style_id!(
    /// Selects a fill from the renderer palette.
    BrushId
);
style_id!(
    /// Selects a font from the renderer palette.
    FontId
);

impl PenId {
    pub const AXIS: Self = Self(1);
    pub const AXIS_OVERLAY: Self = Self(2);
    pub const GRAPH: Self = Self(3);
    pub const TODAY_LINE: Self = Self(4);
    pub const BAR: Self = Self(5);
    pub const LEGEND: Self = Self(6);
}

impl BrushId {
    pub const GRAPH_NORMAL: Self = Self(1);
    pub const GRAPH_FUTURE: Self = Self(2);
    pub const BAR_NORMAL: Self = Self(3);
    pub const BAR_FUTURE: Self = Self(4);
    pub const LEGEND: Self = Self(5);
    pub const SLICE_0: Self = Self(100);
    pub const SLICE_1: Self = Self(101);
    pub const SLICE_2: Self = Self(102);
    pub const SLICE_3: Self = Self(103);
    pub const SLICE_4: Self = Self(104);
    pub const SLICE_5: Self = Self(105);

    /// Number of distinct pie slice brushes in the standard palette.
    pub const SLICE_COUNT: u16 = 6;

    /// Slice brush for the `index`-th pie slice, cycling through the palette.
    #[must_use]
    pub const fn slice(index: usize) -> Self {
        Self(Self::SLICE_0.0 + (index % Self::SLICE_COUNT as usize) as u16)
    }
}

impl FontId {
    pub const TITLE: Self = Self(1);
    pub const AXIS_LABEL: Self = Self(2);
    pub const LEGEND: Self = Self(3);
}
