//! Named aspect-ratio buckets.
//!
//! A resolution is mapped to the bucket whose ratio is closest on a logarithmic
//! scale, so `16:9` and `9:16` sit at the same distance from `square`. The
//! boundary between two neighbouring buckets is the geometric mean of their
//! ratios; for example every ratio in `[1.0, sqrt(1.25))` is `square` and
//! `[sqrt(1.25), sqrt(1.25 * 4/3))` is `5:4`. Ratios wider than `21:9` or taller
//! than `9:16` fall into those outermost buckets. An exact tie goes to the bucket
//! listed first in [`AspectRatio::BUCKETS`].

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "media_item_aspect_ratio"))]
pub enum AspectRatio {
    #[serde(rename = "21:9")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "21:9"))]
    UltraWide,
    #[serde(rename = "16:9")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "16:9"))]
    Widescreen,
    #[serde(rename = "16:10")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "16:10"))]
    SixteenTen,
    #[serde(rename = "3:2")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "3:2"))]
    ThreeTwo,
    #[serde(rename = "4:3")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "4:3"))]
    FourThree,
    #[serde(rename = "5:4")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "5:4"))]
    FiveFour,
    #[serde(rename = "square")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "square"))]
    Square,
    #[serde(rename = "4:5")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "4:5"))]
    FourFive,
    #[serde(rename = "3:4")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "3:4"))]
    ThreeFour,
    #[serde(rename = "2:3")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "2:3"))]
    TwoThree,
    #[serde(rename = "10:16")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "10:16"))]
    TenSixteen,
    #[serde(rename = "9:16")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "9:16"))]
    Portrait,
    /// Degenerate bucket for a zero width or height.
    #[serde(rename = "undefined")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "undefined"))]
    Undefined,
}

impl AspectRatio {
    /// Buckets with their (width, height) ratio terms, widest first.
    pub const BUCKETS: [(AspectRatio, u32, u32); 12] = [
        (AspectRatio::UltraWide, 21, 9),
        (AspectRatio::Widescreen, 16, 9),
        (AspectRatio::SixteenTen, 16, 10),
        (AspectRatio::ThreeTwo, 3, 2),
        (AspectRatio::FourThree, 4, 3),
        (AspectRatio::FiveFour, 5, 4),
        (AspectRatio::Square, 1, 1),
        (AspectRatio::FourFive, 4, 5),
        (AspectRatio::ThreeFour, 3, 4),
        (AspectRatio::TwoThree, 2, 3),
        (AspectRatio::TenSixteen, 10, 16),
        (AspectRatio::Portrait, 9, 16),
    ];

    pub fn from_width_and_height(width: u32, height: u32) -> AspectRatio {
        if width == 0 || height == 0 {
            return AspectRatio::Undefined;
        }

        let log_ratio = f64::from(width).ln() - f64::from(height).ln();

        let mut best = AspectRatio::Undefined;
        let mut best_distance = f64::INFINITY;
        for (bucket, w, h) in Self::BUCKETS {
            let distance = (log_ratio - (f64::from(w).ln() - f64::from(h).ln())).abs();
            if distance < best_distance {
                best = bucket;
                best_distance = distance;
            }
        }

        best
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::UltraWide => "21:9",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::SixteenTen => "16:10",
            AspectRatio::ThreeTwo => "3:2",
            AspectRatio::FourThree => "4:3",
            AspectRatio::FiveFour => "5:4",
            AspectRatio::Square => "square",
            AspectRatio::FourFive => "4:5",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::TwoThree => "2:3",
            AspectRatio::TenSixteen => "10:16",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Undefined => "undefined",
        }
    }

    pub fn is_landscape(&self) -> bool {
        matches!(
            self,
            AspectRatio::UltraWide
                | AspectRatio::Widescreen
                | AspectRatio::SixteenTen
                | AspectRatio::ThreeTwo
                | AspectRatio::FourThree
                | AspectRatio::FiveFour
        )
    }

    pub fn is_portrait(&self) -> bool {
        matches!(
            self,
            AspectRatio::FourFive
                | AspectRatio::ThreeFour
                | AspectRatio::TwoThree
                | AspectRatio::TenSixteen
                | AspectRatio::Portrait
        )
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
