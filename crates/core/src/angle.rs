//! Angle constants and the explicit degrees/radians notation.
//!
//! Every math API takes radians. [`AngleNotation`] converts user-facing values
//! at the boundary.

use std::str::FromStr;

use crate::MathError;

pub const DEG_15: f32 = 15.0;
pub const DEG_30: f32 = 30.0;
pub const DEG_45: f32 = 45.0;
pub const DEG_60: f32 = 60.0;
pub const DEG_90: f32 = 90.0;
pub const DEG_180: f32 = 180.0;
pub const DEG_270: f32 = 270.0;
pub const DEG_360: f32 = 360.0;

pub const QUARTER_PI: f32 = std::f32::consts::FRAC_PI_4;
pub const THIRD_PI: f32 = std::f32::consts::FRAC_PI_3;
pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;
pub const PI: f32 = std::f32::consts::PI;
pub const THREE_HALVES_PI: f32 = 3.0 * std::f32::consts::FRAC_PI_2;
pub const TWO_PI: f32 = std::f32::consts::TAU;

pub const DEGREES_PER_RADIAN: f32 = 180.0 / std::f32::consts::PI;
pub const RADIANS_PER_DEGREE: f32 = std::f32::consts::PI / 180.0;

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * RADIANS_PER_DEGREE
}

#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * DEGREES_PER_RADIAN
}

/// Unit in which user-facing angles are expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleNotation {
    #[default]
    Radians,
    Degrees,
}

impl AngleNotation {
    /// Converts a value in this notation to radians.
    #[inline]
    pub fn to_radians(self, value: f32) -> f32 {
        match self {
            Self::Radians => value,
            Self::Degrees => degrees_to_radians(value),
        }
    }

    /// Converts radians to this notation.
    #[inline]
    pub fn from_radians(self, radians: f32) -> f32 {
        match self {
            Self::Radians => radians,
            Self::Degrees => radians_to_degrees(radians),
        }
    }

    pub fn right_angle(self) -> f32 {
        match self {
            Self::Radians => HALF_PI,
            Self::Degrees => DEG_90,
        }
    }

    pub fn full_revolution(self) -> f32 {
        match self {
            Self::Radians => TWO_PI,
            Self::Degrees => DEG_360,
        }
    }

    /// Removes complete revolutions, keeping the sign of `angle`.
    pub fn truncate(self, angle: f32) -> f32 {
        angle % self.full_revolution()
    }

    /// Number of revolutions, fractional part included.
    pub fn count_revolutions(self, angle: f32) -> f32 {
        angle / self.full_revolution()
    }

    pub fn count_complete_revolutions(self, angle: f32) -> f32 {
        self.count_revolutions(angle).trunc()
    }
}

impl FromStr for AngleNotation {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rad" | "radians" => Ok(Self::Radians),
            "deg" | "degrees" => Ok(Self::Degrees),
            other => Err(MathError::InvalidAngleNotation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float::are_equal;

    const DEG_540: f32 = DEG_360 + DEG_180;

    #[test]
    fn conversion_between_units() {
        assert!(are_equal(degrees_to_radians(DEG_180), PI));
        assert!(are_equal(radians_to_degrees(HALF_PI), DEG_90));
        assert!(are_equal(AngleNotation::Degrees.to_radians(DEG_45), QUARTER_PI));
        assert!(are_equal(AngleNotation::Degrees.from_radians(THIRD_PI), DEG_60));
        assert_eq!(AngleNotation::Radians.to_radians(1.5), 1.5);
    }

    #[test]
    fn truncate_keeps_remainder_and_sign() {
        assert!(are_equal(AngleNotation::Degrees.truncate(450.0), DEG_90));
        assert!(are_equal(AngleNotation::Degrees.truncate(-450.0), -DEG_90));
        assert!(are_equal(
            AngleNotation::Radians.truncate(TWO_PI + HALF_PI),
            HALF_PI
        ));
    }

    #[test]
    fn revolutions_are_counted_in_the_active_unit() {
        assert!(are_equal(AngleNotation::Degrees.count_revolutions(DEG_540), 1.5));
        assert_eq!(AngleNotation::Degrees.count_complete_revolutions(DEG_540), 1.0);
        assert!(are_equal(AngleNotation::Radians.count_revolutions(-PI), -0.5));
    }

    #[test]
    fn notation_parses_from_cli_spelling() {
        assert_eq!("deg".parse::<AngleNotation>(), Ok(AngleNotation::Degrees));
        assert_eq!("Radians".parse::<AngleNotation>(), Ok(AngleNotation::Radians));
        assert!(matches!(
            "grad".parse::<AngleNotation>(),
            Err(MathError::InvalidAngleNotation(_))
        ));
        assert_eq!(AngleNotation::default(), AngleNotation::Radians);
    }
}
