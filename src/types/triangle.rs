use super::{circle::Circle, edge::Edge, point::Point};
use crate::error::RegionGraphResult;
use crate::geometry;

/// Dreieck mit einmalig berechnetem, danach unveränderlichem Umkreis.
#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: [Point; 3],
    circumcircle: Circle,
}

impl Triangle {
    /// Schlägt fehl, wenn die drei Ecken kollinear sind.
    pub fn new(a: Point, b: Point, c: Point) -> RegionGraphResult<Self> {
        let circumcircle = geometry::circumscribed_circle(a, b, c)?;
        Ok(Self {
            vertices: [a, b, c],
            circumcircle,
        })
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    pub fn circumcircle(&self) -> Circle {
        self.circumcircle
    }

    pub fn circumcenter(&self) -> Point {
        self.circumcircle.center
    }

    /// Die drei Kanten in fester Eckenreihenfolge.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    pub fn has_vertex(&self, point: Point) -> bool {
        self.vertices.iter().any(|vertex| *vertex == point)
    }

    /// Stumpfwinklig, sobald an einer Ecke das Skalarprodukt negativ wird.
    pub fn is_obtuse(&self) -> bool {
        for i in 0..3 {
            let corner = self.vertices[i].to_vec2();
            let u = self.vertices[(i + 1) % 3].to_vec2() - corner;
            let w = self.vertices[(i + 2) % 3].to_vec2() - corner;
            if u.dot(w) < 0.0 {
                return true;
            }
        }
        false
    }

    /// Ist `edge` mindestens so lang wie jede Kante des Dreiecks?
    pub fn is_longest_edge(&self, edge: &Edge) -> bool {
        let length = edge.length();
        self.edges().iter().all(|other| other.length() <= length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegionGraphError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circumcircle_of_right_triangle() {
        let triangle = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        )
        .unwrap();
        let circle = triangle.circumcircle();
        assert_abs_diff_eq!(circle.center.x, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(circle.center.y, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(circle.radius, 0.5f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_collinear_vertices_are_rejected() {
        let result = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.5),
            Point::new(1.0, 1.0),
        );
        assert!(matches!(
            result,
            Err(RegionGraphError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_edges_use_fixed_vertex_order() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(0.0, 1.0);
        let triangle = Triangle::new(a, b, c).unwrap();
        assert_eq!(triangle.edges(), [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]);
    }

    #[test]
    fn test_obtuse_detection() {
        let right = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        )
        .unwrap();
        assert!(!right.is_obtuse());

        let obtuse = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.9, 0.1),
        )
        .unwrap();
        assert!(obtuse.is_obtuse());
    }

    #[test]
    fn test_longest_edge() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(0.0, 0.5);
        let triangle = Triangle::new(a, b, c).unwrap();
        assert!(triangle.is_longest_edge(&Edge::new(b, c)));
        assert!(!triangle.is_longest_edge(&Edge::new(a, b)));
        assert!(!triangle.is_longest_edge(&Edge::new(a, c)));
    }
}
