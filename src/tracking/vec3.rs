use num_traits::real::Real;
use std::ops::{Add, Div, Mul, Sub};

/// A 3D vector generic over any real numeric type.
///
/// Represents a point or direction in the inertial frame and provides the
/// small set of operations the geometry code needs.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Vec3<T> {
    x: T,
    y: T,
    z: T,
}

impl<T: Copy> Vec3<T> {
    /// Creates a new vector from its components.
    pub const fn new(x: T, y: T, z: T) -> Self { Self { x, y, z } }

    /// Returns the x-component of the vector.
    pub const fn x(&self) -> T { self.x }

    /// Returns the y-component of the vector.
    pub const fn y(&self) -> T { self.y }

    /// Returns the z-component of the vector.
    pub const fn z(&self) -> T { self.z }
}

impl<T: Real> Vec3<T> {
    /// Computes the magnitude (absolute value) of the vector.
    pub fn abs(&self) -> T { (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt() }

    /// Computes the dot product with another vector.
    pub fn dot(self, other: Vec3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the Euclidean distance to another vector.
    pub fn euclid_distance(&self, other: &Self) -> T {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }

    /// Normalizes the vector to unit magnitude. A zero vector is returned
    /// unmodified.
    pub fn normalize(self) -> Self {
        let magnitude = self.abs();
        if magnitude == T::zero() {
            self
        } else {
            Self::new(self.x / magnitude, self.y / magnitude, self.z / magnitude)
        }
    }

    /// Creates a zero vector.
    pub fn zero() -> Self { Self::new(T::zero(), T::zero(), T::zero()) }
}

impl<T: Real> Add for Vec3<T> {
    type Output = Vec3<T>;

    fn add(self, rhs: Vec3<T>) -> Self::Output {
        Self::Output::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Real> Sub for Vec3<T> {
    type Output = Vec3<T>;

    fn sub(self, rhs: Vec3<T>) -> Self::Output {
        Self::Output::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Real> Mul<T> for Vec3<T> {
    type Output = Vec3<T>;

    fn mul(self, rhs: T) -> Self::Output {
        Self::Output::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<T: Real> Div<T> for Vec3<T> {
    type Output = Vec3<T>;

    fn div(self, rhs: T) -> Self::Output {
        Self::Output::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<T: Copy> From<(T, T, T)> for Vec3<T> {
    fn from(tuple: (T, T, T)) -> Self { Vec3::new(tuple.0, tuple.1, tuple.2) }
}
