//! Strongly-typed geometry primitives (zero-cost newtypes).
//!
//! Screen-space and user-space coordinates are distinct types so a raw pointer position
//! can never be handed to code that expects SVG user units, or the other way around.
//! The only bridge between the two is a [`Matrix`].

use std::fmt;
use std::ops::{Add, Mul, Sub};

use glam::{DAffine2, DVec2, dvec2};

/// A coordinate along one axis of some space.
pub trait Coord: Copy {
    fn from_raw(val: f64) -> Self;
    fn raw(self) -> f64;
}

/// Screen (client) pixels, as reported by pointer events and bounding boxes
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct ScreenPx(pub f64);

/// SVG user units, after the inverse screen transform
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct UserUnit(pub f64);

macro_rules! impl_coord {
    ($($ty:ident),*) => {
        $(
            impl Coord for $ty {
                #[inline]
                fn from_raw(val: f64) -> Self { $ty(val) }
                #[inline]
                fn raw(self) -> f64 { self.0 }
            }

            impl Add for $ty {
                type Output = $ty;
                fn add(self, rhs: $ty) -> $ty { $ty(self.0 + rhs.0) }
            }

            impl Sub for $ty {
                type Output = $ty;
                fn sub(self, rhs: $ty) -> $ty { $ty(self.0 - rhs.0) }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

impl_coord!(ScreenPx, UserUnit);

/// Generic 2D point; the coordinate type names the space it lives in
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

impl<T: Coord> Point<T> {
    /// Build a point from raw components.
    #[inline]
    pub fn from_xy(x: f64, y: f64) -> Self {
        Point {
            x: T::from_raw(x),
            y: T::from_raw(y),
        }
    }

    #[inline]
    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x.raw(), self.y.raw())
    }

    #[inline]
    pub fn from_dvec2(v: DVec2) -> Self {
        Self::from_xy(v.x, v.y)
    }
}

impl<T: fmt::Display> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point in screen space (raw client coordinates)
pub type ScreenPoint = Point<ScreenPx>;

/// A point in SVG user space
pub type UserPoint = Point<UserUnit>;

/// Width and height resolved from declared sizes (style or attributes)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const ZERO: Dimensions = Dimensions {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Dimensions { width, height }
    }
}

/// Rendered bounding box of an element, in screen pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect at the origin with the given size.
    pub fn sized(width: f64, height: f64) -> Self {
        Rect {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// 2D affine transform in the SVG `[[a,c,e],[b,d,f],[0,0,1]]` layout.
///
/// Coefficients are never validated: NaN and infinities pass through untouched so callers
/// can animate through degenerate states.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(transparent)]
pub struct Matrix(pub DAffine2);

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix(DAffine2::IDENTITY);

    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Matrix(DAffine2::from_cols_array(&[a, b, c, d, e, f]))
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Matrix::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Matrix::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn a(&self) -> f64 {
        self.0.matrix2.x_axis.x
    }

    pub fn b(&self) -> f64 {
        self.0.matrix2.x_axis.y
    }

    pub fn c(&self) -> f64 {
        self.0.matrix2.y_axis.x
    }

    pub fn d(&self) -> f64 {
        self.0.matrix2.y_axis.y
    }

    pub fn e(&self) -> f64 {
        self.0.translation.x
    }

    pub fn f(&self) -> f64 {
        self.0.translation.y
    }

    /// Coefficients in `a, b, c, d, e, f` order.
    #[inline]
    pub fn to_array(&self) -> [f64; 6] {
        self.0.to_cols_array()
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a() * self.d() - self.b() * self.c()
    }

    /// Inverse transform, or `None` when the matrix is singular (or not finite).
    pub fn inverse(&self) -> Option<Matrix> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Matrix(self.0.inverse()))
    }

    /// Map a raw point through this transform.
    #[inline]
    pub fn transform_vec(&self, v: DVec2) -> DVec2 {
        self.0.transform_point2(v)
    }
}

/// `self * rhs` applies `rhs` first, like `SVGMatrix.multiply`.
impl Mul for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix(self.0 * rhs.0)
    }
}

impl From<DAffine2> for Matrix {
    fn from(affine: DAffine2) -> Self {
        Matrix(affine)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::transform::format_matrix(self))
    }
}
