//! Closed-form overlap measures for uniform fields.

use std::f64::consts::PI;

/// Area of a disc.
pub fn disc_area(radius: f64) -> f64 {
    PI * radius * radius
}

/// Volume of a ball.
pub fn ball_volume(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius.powi(3)
}

/// Area of the intersection of two discs whose centers are `d` apart.
pub fn lens_area(d: f64, r1: f64, r2: f64) -> f64 {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        return disc_area(r1.min(r2));
    }
    let a1 = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0).acos();
    let a2 = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0).acos();
    let kite = (-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2);
    r1 * r1 * a1 + r2 * r2 * a2 - 0.5 * kite.max(0.0).sqrt()
}

/// Volume of the intersection of two balls whose centers are `d` apart.
pub fn lens_volume(d: f64, r1: f64, r2: f64) -> f64 {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        return ball_volume(r1.min(r2));
    }
    let gap = r1 + r2 - d;
    PI * gap * gap * (d * d + 2.0 * d * (r1 + r2) - 3.0 * (r1 - r2).powi(2)) / (12.0 * d)
}
