//! Defines geometric primitives: bounding boxes and affine transforms.

/// An axis-aligned box given by its extremal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// minimal x-value
    pub x_min : f64,
    /// maximal x-value
    pub x_max : f64,
    /// minimal y-value
    pub y_min : f64,
    /// maximal y-value
    pub y_max : f64,
}

impl BBox {
    /// Creates new bbox from coordinates of extremal points
    /// Does not check the invariant that `x_min <= x_max` and `y_min <= y_max`
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        debug_assert!(x_min <= x_max);
        debug_assert!(y_min <= y_max);
        Self { x_min, x_max, y_min, y_max }
    }

    /// Creates a bbox, given a position for top-left corner, width and height.
    /// Negative dimensions are normalised.
    pub fn from_dims(x : f64, y : f64, width : f64, height : f64) -> Self {
        Self {
            x_min : x.min(x + width), x_max : x.max(x + width),
            y_min : y.min(y + height), y_max : y.max(y + height),
        }
    }

    /// Creates a bbox corresponding to a zero-width zero-height point
    pub fn single_point(x : f64, y : f64) -> Self {
        Self {
            x_min : x, x_max : x,
            y_min : y, y_max : y,
        }
    }

    /// Creates the smallest bbox containing `self` and the point with coordinates `x` and `y`
    pub fn enclose(&self, x : f64, y: f64) -> Self {
        self.union(Self::single_point(x, y))
    }

    /// Creates the smallest bbox containing `self` and `other`
    pub fn union(&self, other: Self) -> Self {
        Self {
            x_min : self.x_min.min(other.x_min),
            x_max : self.x_max.max(other.x_max),
            y_min : self.y_min.min(other.y_min),
            y_max : self.y_max.max(other.y_max),
        }
    }

    /// Grows the box by `margin` on every side
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            x_min : self.x_min - margin,
            x_max : self.x_max + margin,
            y_min : self.y_min - margin,
            y_max : self.y_max + margin,
        }
    }

    /// Width of the bounding box
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// The unsigned distance between the top of the box and the bottom of the box
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether `other` lies inside `self`, with a tolerance of `epsilon` on every side
    pub fn contains(&self, other: &BBox, epsilon: f64) -> bool {
        other.x_min >= self.x_min - epsilon && other.x_max <= self.x_max + epsilon &&
        other.y_min >= self.y_min - epsilon && other.y_max <= self.y_max + epsilon
    }
}


/// Affine map `(x, y) -> (sx*x + kx*y + tx, ky*x + sy*y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// x scale
    pub sx: f64,
    /// y skew
    pub ky: f64,
    /// x skew
    pub kx: f64,
    /// y scale
    pub sy: f64,
    /// x translation
    pub tx: f64,
    /// y translation
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity
    pub const fn identity() -> Self {
        Self { sx: 1.0, ky: 0.0, kx: 0.0, sy: 1.0, tx: 0.0, ty: 0.0 }
    }

    /// `self`, preceded by a translation
    pub fn pre_translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            tx: self.sx * dx + self.kx * dy + self.tx,
            ty: self.ky * dx + self.sy * dy + self.ty,
            ..*self
        }
    }

    /// `self`, preceded by a rotation of `degrees` (clockwise on screen, since y points down)
    pub fn pre_rotate(&self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            sx: self.sx * cos + self.kx * sin,
            ky: self.ky * cos + self.sy * sin,
            kx: -self.sx * sin + self.kx * cos,
            sy: -self.ky * sin + self.sy * cos,
            ..*self
        }
    }

    /// Image of the point `(x, y)`
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.sx * x + self.kx * y + self.tx, self.ky * x + self.sy * y + self.ty)
    }

    /// Smallest box containing the image of `bbox`
    pub fn apply_bbox(&self, bbox: &BBox) -> BBox {
        let corners = [
            self.apply(bbox.x_min, bbox.y_min),
            self.apply(bbox.x_max, bbox.y_min),
            self.apply(bbox.x_min, bbox.y_max),
            self.apply(bbox.x_max, bbox.y_max),
        ];
        corners[1..].iter()
            .fold(BBox::single_point(corners[0].0, corners[0].1), |b, &(x, y)| b.enclose(x, y))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn transforms() {
        let t = Transform::identity().pre_translate(10.0, 5.0);
        assert!(close(t.apply(1.0, 1.0), (11.0, 6.0)));
        let r = t.pre_rotate(90.0);
        assert!(close(r.apply(1.0, 0.0), (10.0, 6.0)));
        assert!(close(r.apply(0.0, 1.0), (9.0, 5.0)));
    }

    #[test]
    fn boxes() {
        let b = BBox::from_dims(0.0, 0.0, 2.0, -1.0);
        assert_eq!(b, BBox::new(0.0, -1.0, 2.0, 0.0));
        let u = b.union(BBox::single_point(3.0, 1.0));
        assert_eq!((u.width(), u.height()), (3.0, 2.0));
        assert!(u.contains(&b, 0.0));
        assert!(!b.contains(&u, 0.5));
        let rotated = Transform::identity().pre_rotate(90.0).apply_bbox(&b);
        assert!((rotated.width() - 1.0).abs() < 1e-9 && (rotated.height() - 2.0).abs() < 1e-9);
    }
}
