/// Cartesian <-> spherical polar conversions
///
/// Coordinates:
///   X: towards the viewer (depth)
///   Y: left to right
///   Z: bottom to top
///
///   r: distance from the origin
///   longitude: angle around Z, left or right (degrees)
///   latitude: angle down from +Z (degrees)

/// A point in spherical polar form, angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub r: f64,
    pub longitude: f64,
    pub latitude: f64,
}

impl Polar {
    pub fn new(r: f64, longitude: f64, latitude: f64) -> Self {
        Self {
            r,
            longitude,
            latitude,
        }
    }
}

/// Convert Cartesian coordinates to polar.
///
/// The origin maps to `r = 0` with both angles zero, which converts back to
/// the origin, so transforms leave it in place.
pub fn to_polar(x: f64, y: f64, z: f64) -> Polar {
    let r = (x * x + y * y + z * z).sqrt();

    let longitude = if x == 0.0 && y == 0.0 {
        0.0
    } else {
        let long = clamped_acos(x / (x * x + y * y).sqrt()).to_degrees();
        if y < 0.0 {
            -long
        } else {
            long
        }
    };

    let latitude = if r == 0.0 {
        0.0
    } else {
        clamped_acos(z / r).to_degrees()
    };

    Polar::new(r, longitude, latitude)
}

/// Convert polar coordinates back to Cartesian `(x, y, z)`
pub fn to_cartesian(polar: Polar) -> (f64, f64, f64) {
    let (sin_lat, cos_lat) = polar.latitude.to_radians().sin_cos();
    let (sin_long, cos_long) = polar.longitude.to_radians().sin_cos();

    (
        polar.r * sin_lat * cos_long,
        polar.r * sin_lat * sin_long,
        polar.r * cos_lat,
    )
}

// Rounding can push the ratio a hair outside [-1, 1]
fn clamped_acos(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).acos()
}
