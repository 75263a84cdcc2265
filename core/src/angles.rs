use crate::types::Landmark;

// --- RoundTo trait (offentlig, brukt i hele pipelinen) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// 2D-punkt i normaliserte bildekoordinater.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    /// Projisert 2D-punkt, avrundet til 3 desimaler før vinkelmatte
    /// (fast presisjon gir bit-for-bit reproduserbare summer).
    #[inline]
    pub fn point(&self) -> Point2 {
        Point2 {
            x: self.x.round_to(3),
            y: self.y.round_to(3),
        }
    }
}

/// Indre vinkel (grader, [0,180]) i vertex `b` mellom strålene b→a og b→c.
/// To-arctan-differanse; resultater over 180° foldes til 360−vinkel.
/// Sammenfallende punkter er udefinert input – callers ansvar.
pub fn joint_angle(a: Point2, b: Point2, c: Point2) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut angle = radians.to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    angle
}
