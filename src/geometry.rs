// src/geometry.rs

use crate::error::{RegionGraphError, RegionGraphResult};
use crate::types::{Circle, Edge, Point};

/// Toleranzen für geometrische Vergleiche.
pub(crate) const EPSILON: f32 = 1e-6;
pub(crate) const EPSILON_F64: f64 = 1e-10;

/// Umkreismittelpunkt in geschlossener Form; die Zwischenrechnung läuft in f64,
/// damit die quadrierten Koordinaten keine Stellen verlieren.
pub fn circumcenter(a: Point, b: Point, c: Point) -> RegionGraphResult<Point> {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (cx, cy) = (c.x as f64, c.y as f64);

    let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
    if d.abs() < EPSILON_F64 {
        return Err(RegionGraphError::DegenerateGeometry {
            operation: format!("circumcenter of collinear points {a:?}, {b:?}, {c:?}"),
        });
    }

    let ad = ax * ax + ay * ay;
    let bd = bx * bx + by * by;
    let cd = cx * cx + cy * cy;

    Ok(Point::new(
        ((ad * (by - cy) + bd * (cy - ay) + cd * (ay - by)) / d) as f32,
        ((ad * (cx - bx) + bd * (ax - cx) + cd * (bx - ax)) / d) as f32,
    ))
}

/// Umkreis: Mittelpunkt plus Abstand zur ersten Ecke als Radius.
pub fn circumscribed_circle(a: Point, b: Point, c: Point) -> RegionGraphResult<Circle> {
    let center = circumcenter(a, b, c)?;
    Ok(Circle::new(center, a.distance_to(center)))
}

/// Parametrischer Schnittpunkt der Trägergeraden von `e1` und `e2`;
/// der Ergebnispunkt liegt auf der Geraden von `e2`.
pub fn segment_intersection(e1: &Edge, e2: &Edge) -> RegionGraphResult<Point> {
    let (x1, y1) = (e1.from.x as f64, e1.from.y as f64);
    let (x2, y2) = (e1.to.x as f64, e1.to.y as f64);
    let (x3, y3) = (e2.from.x as f64, e2.from.y as f64);
    let (x4, y4) = (e2.to.x as f64, e2.to.y as f64);

    let denominator = (x4 - x3) * (y2 - y1) - (y4 - y3) * (x2 - x1);
    if denominator.abs() < EPSILON_F64 {
        return Err(RegionGraphError::NoIntersection {
            operation: format!("parallel supporting lines of {e1:?} and {e2:?}"),
        });
    }

    let mu = ((x1 - x3) * (y2 - y1) - (y1 - y3) * (x2 - x1)) / denominator;
    Ok(Point::new(
        (x3 + (x4 - x3) * mu) as f32,
        (y3 + (y4 - y3) * mu) as f32,
    ))
}

// === Clipping gegen das Einheitsquadrat ===

const OUTCODE_LEFT: u8 = 1;
const OUTCODE_RIGHT: u8 = 2;
const OUTCODE_BOTTOM: u8 = 4;
const OUTCODE_TOP: u8 = 8;

fn compute_outcode(p: Point) -> u8 {
    let mut code = 0;
    if p.x < 0.0 {
        code |= OUTCODE_LEFT;
    } else if p.x > 1.0 {
        code |= OUTCODE_RIGHT;
    }
    if p.y < 0.0 {
        code |= OUTCODE_BOTTOM;
    } else if p.y > 1.0 {
        code |= OUTCODE_TOP;
    }
    code
}

/// Cohen-Sutherland-Clipping einer Strecke gegen `[0,1]²`.
/// `None`, wenn kein Teil der Strecke innerhalb liegt.
pub(crate) fn clip_segment_to_map(mut p1: Point, mut p2: Point) -> Option<(Point, Point)> {
    let mut outcode1 = compute_outcode(p1);
    let mut outcode2 = compute_outcode(p2);

    loop {
        if (outcode1 | outcode2) == 0 {
            return Some((p1, p2));
        }
        if (outcode1 & outcode2) != 0 {
            return None;
        }

        let outcode_out = if outcode1 != 0 { outcode1 } else { outcode2 };
        let mut intersection = Point::new(0.0, 0.0);

        if (outcode_out & OUTCODE_TOP) != 0 {
            intersection.x = if (p2.y - p1.y).abs() > EPSILON {
                p1.x + (p2.x - p1.x) * (1.0 - p1.y) / (p2.y - p1.y)
            } else {
                p1.x
            };
            intersection.y = 1.0;
        } else if (outcode_out & OUTCODE_BOTTOM) != 0 {
            intersection.x = if (p2.y - p1.y).abs() > EPSILON {
                p1.x + (p2.x - p1.x) * (0.0 - p1.y) / (p2.y - p1.y)
            } else {
                p1.x
            };
            intersection.y = 0.0;
        } else if (outcode_out & OUTCODE_RIGHT) != 0 {
            intersection.y = if (p2.x - p1.x).abs() > EPSILON {
                p1.y + (p2.y - p1.y) * (1.0 - p1.x) / (p2.x - p1.x)
            } else {
                p1.y
            };
            intersection.x = 1.0;
        } else if (outcode_out & OUTCODE_LEFT) != 0 {
            intersection.y = if (p2.x - p1.x).abs() > EPSILON {
                p1.y + (p2.y - p1.y) * (0.0 - p1.x) / (p2.x - p1.x)
            } else {
                p1.y
            };
            intersection.x = 0.0;
        } else {
            return None;
        }

        if outcode_out == outcode1 {
            p1 = intersection;
            outcode1 = compute_outcode(p1);
        } else {
            p2 = intersection;
            outcode2 = compute_outcode(p2);
        }
    }
}
