//! Geographic scalars: coordinates, zoom levels and loosely typed numeric input.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest zoom level a map may be set to.
pub const MIN_ZOOM: u8 = 1;
/// Highest zoom level a map may be set to.
pub const MAX_ZOOM: u8 = 18;
/// Zoom used when a map is created without one.
pub const DEFAULT_ZOOM: u8 = 12;

/// A WGS-84 position in degrees.
///
/// Serialized as `[lat, lng]`, the order Leaflet expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a position from loosely typed input.
    ///
    /// Both values must be finite numbers (or strings that parse as such).
    pub fn try_new<A: Scalar, B: Scalar>(lat: A, lng: B) -> Result<Self> {
        let lat_v = lat
            .to_number()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::invalid("lat", &lat, "latitude must be numeric"))?;
        let lng_v = lng
            .to_number()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::invalid("lng", &lng, "longitude must be numeric"))?;
        Ok(Self::new(lat_v, lng_v))
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// A zoom level, always within [`MIN_ZOOM`]..=[`MAX_ZOOM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    /// Clamp any integer into the valid range.
    pub fn clamped(zoom: i64) -> Self {
        Self(zoom.clamp(MIN_ZOOM as i64, MAX_ZOOM as i64) as u8)
    }

    /// Accept integer-valued input and clamp it; anything else is rejected.
    pub fn from_scalar<Z: Scalar>(zoom: Z) -> Result<Self> {
        zoom.to_integer()
            .map(Self::clamped)
            .ok_or_else(|| Error::invalid("zoom", &zoom, "zoom must be an integer"))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

impl From<u8> for ZoomLevel {
    fn from(z: u8) -> Self {
        Self::clamped(z as i64)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(z: ZoomLevel) -> Self {
        z.0
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loosely typed numeric input.
///
/// Setters that take coordinates or zoom levels from user-facing sources
/// (CLI text, JSON configs, notebook cells) accept any `Scalar` and validate
/// it themselves, so a bad value surfaces as [`Error::InvalidArgument`]
/// instead of a parse error somewhere upstream.
pub trait Scalar: fmt::Debug {
    /// The value as a real number, if it is one.
    fn to_number(&self) -> Option<f64>;
    /// The value as an integer, if it is integer-valued. Integers outside
    /// the `i64` range saturate.
    fn to_integer(&self) -> Option<i64>;
}

impl<T: Scalar + ?Sized> Scalar for &T {
    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }

    fn to_integer(&self) -> Option<i64> {
        (**self).to_integer()
    }
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                fn to_number(&self) -> Option<f64> {
                    Some(*self as f64)
                }

                fn to_integer(&self) -> Option<i64> {
                    Some(i64::try_from(*self).unwrap_or(if (*self as f64) < 0.0 {
                        i64::MIN
                    } else {
                        i64::MAX
                    }))
                }
            }
        )*
    };
}

impl_scalar_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

fn integral(v: f64) -> Option<i64> {
    // `as` saturates out-of-range floats.
    if v.is_finite() && v.fract() == 0.0 {
        Some(v as i64)
    } else {
        None
    }
}

impl Scalar for f64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self)
    }

    fn to_integer(&self) -> Option<i64> {
        integral(*self)
    }
}

impl Scalar for f32 {
    fn to_number(&self) -> Option<f64> {
        Some(*self as f64)
    }

    fn to_integer(&self) -> Option<i64> {
        integral(*self as f64)
    }
}

impl Scalar for str {
    fn to_number(&self) -> Option<f64> {
        self.trim().parse().ok()
    }

    fn to_integer(&self) -> Option<i64> {
        let text = self.trim();
        if let Ok(n) = text.parse() {
            return Some(n);
        }
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(if negative { i64::MIN } else { i64::MAX })
    }
}

impl Scalar for String {
    fn to_number(&self) -> Option<f64> {
        self.as_str().to_number()
    }

    fn to_integer(&self) -> Option<i64> {
        self.as_str().to_integer()
    }
}

impl Scalar for serde_json::Value {
    fn to_number(&self) -> Option<f64> {
        match self {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.to_number(),
            _ => None,
        }
    }

    fn to_integer(&self) -> Option<i64> {
        match self {
            serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
            serde_json::Value::String(s) => s.to_integer(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn zoom_clamps() {
        assert_eq!(ZoomLevel::clamped(0).get(), 1);
        assert_eq!(ZoomLevel::clamped(25).get(), 18);
        assert_eq!(ZoomLevel::clamped(-4).get(), 1);
        assert_eq!(ZoomLevel::clamped(7).get(), 7);
    }

    #[test]
    fn zoom_rejects_fractions() {
        let err = ZoomLevel::from_scalar(3.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(ZoomLevel::from_scalar("ten").is_err());
        assert!(ZoomLevel::from_scalar(f64::NAN).is_err());
        assert!(ZoomLevel::from_scalar(json!(null)).is_err());
    }

    #[test]
    fn zoom_accepts_integer_valued_input() {
        assert_eq!(ZoomLevel::from_scalar(10).unwrap().get(), 10);
        assert_eq!(ZoomLevel::from_scalar(10.0).unwrap().get(), 10);
        assert_eq!(ZoomLevel::from_scalar(" 9 ").unwrap().get(), 9);
        assert_eq!(ZoomLevel::from_scalar(json!(30)).unwrap().get(), 18);
    }

    #[test]
    fn oversized_integers_saturate() {
        assert_eq!(ZoomLevel::from_scalar(u64::MAX).unwrap().get(), 18);
        assert_eq!(ZoomLevel::from_scalar(1e20_f64).unwrap().get(), 18);
        assert_eq!(ZoomLevel::from_scalar(-1e20_f64).unwrap().get(), 1);
        assert_eq!(ZoomLevel::from_scalar("100000000000000000000").unwrap().get(), 18);
        assert_eq!(ZoomLevel::from_scalar("-100000000000000000000").unwrap().get(), 1);
        assert_eq!(ZoomLevel::from_scalar(json!(u64::MAX)).unwrap().get(), 18);
        assert!(ZoomLevel::from_scalar("1e20").is_err());
        assert!(ZoomLevel::from_scalar(f64::INFINITY).is_err());
    }

    #[test]
    fn latlng_requires_numbers() {
        let err = LatLng::try_new("a", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(LatLng::try_new(1.0, f64::INFINITY).is_err());
        assert!(LatLng::try_new(json!("x"), json!(2)).is_err());

        let p = LatLng::try_new("37.5", 127).unwrap();
        assert_relative_eq!(p.lat, 37.5);
        assert_relative_eq!(p.lng, 127.0);
    }

    #[test]
    fn latlng_serializes_as_pair() {
        let p = LatLng::new(37.55, 126.98);
        assert_eq!(serde_json::to_value(p).unwrap(), json!([37.55, 126.98]));
        let back: LatLng = serde_json::from_value(json!([1.5, -2.0])).unwrap();
        assert_eq!(back, LatLng::new(1.5, -2.0));
    }
}
