use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Default, Clone, Copy, Debug, Eq, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[repr(C)]
pub struct V3c<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

pub type V3cf64 = V3c<f64>;

impl<T: Copy> V3c<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
    pub fn unit(scale: T) -> Self {
        Self {
            x: scale,
            y: scale,
            z: scale,
        }
    }
}

impl<T> SubAssign for V3c<T>
where
    T: Copy + Sub<Output = T>,
{
    fn sub_assign(&mut self, other: V3c<T>) {
        *self = *self - other;
    }
}

impl<T> AddAssign for V3c<T>
where
    T: Copy + Add<Output = T>,
{
    fn add_assign(&mut self, other: V3c<T>) {
        *self = *self + other;
    }
}

impl<T> V3c<T>
where
    T: num_traits::Signed + Clone,
{
    pub fn abs(&mut self) -> &mut Self {
        self.x = self.x.abs();
        self.y = self.y.abs();
        self.z = self.z.abs();
        self
    }
}

impl V3c<f64> {
    pub fn length(&self) -> f64 {
        ((self.x * self.x) + (self.y * self.y) + (self.z * self.z)).sqrt()
    }

    pub fn normalized(self) -> V3c<f64> {
        self / self.length()
    }

    pub fn signum(&self) -> V3c<f64> {
        V3c {
            x: self.x.signum(),
            y: self.y.signum(),
            z: self.z.signum(),
        }
    }
}

impl V3c<i64> {
    pub fn length(&self) -> f64 {
        (((self.x * self.x) + (self.y * self.y) + (self.z * self.z)) as f64).sqrt()
    }
    pub fn sign(&self) -> V3c<i64> {
        V3c::new(self.x.signum(), self.y.signum(), self.z.signum())
    }
}

impl V3c<u32> {
    pub fn length(&self) -> f64 {
        (((self.x * self.x) + (self.y * self.y) + (self.z * self.z)) as f64).sqrt()
    }
}

impl<T> V3c<T>
where
    T: std::ops::Mul<Output = T>
        + std::ops::Div<Output = T>
        + std::ops::Add<Output = T>
        + std::ops::Sub<Output = T>
        + std::marker::Copy,
{
    pub fn dot(&self, other: &V3c<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: V3c<T>) -> V3c<T> {
        V3c {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl<T: Add<Output = T>> Add for V3c<T> {
    type Output = V3c<T>;

    fn add(self, other: V3c<T>) -> V3c<T> {
        V3c {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T> Sub for V3c<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = V3c<T>;

    fn sub(self, other: V3c<T>) -> V3c<T> {
        V3c {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Neg<Output = T>> Neg for V3c<T> {
    type Output = V3c<T>;

    fn neg(self) -> V3c<T> {
        V3c {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for V3c<T> {
    type Output = V3c<T>;

    fn mul(self, scalar: T) -> V3c<T> {
        V3c {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl<T: Mul<Output = T> + Copy> Mul<V3c<T>> for V3c<T> {
    type Output = V3c<T>;

    fn mul(self, other: V3c<T>) -> V3c<T> {
        V3c {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for V3c<T> {
    type Output = V3c<T>;

    fn div(self, scalar: T) -> V3c<T> {
        V3c {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl From<V3c<u32>> for V3c<i64> {
    fn from(vec: V3c<u32>) -> V3c<i64> {
        V3c::new(vec.x as i64, vec.y as i64, vec.z as i64)
    }
}

impl From<V3c<i64>> for V3c<f64> {
    fn from(vec: V3c<i64>) -> V3c<f64> {
        V3c::new(vec.x as f64, vec.y as f64, vec.z as f64)
    }
}

impl From<V3c<u32>> for V3c<f64> {
    fn from(vec: V3c<u32>) -> V3c<f64> {
        V3c::new(vec.x as f64, vec.y as f64, vec.z as f64)
    }
}

impl From<[f64; 3]> for V3c<f64> {
    fn from(vec: [f64; 3]) -> V3c<f64> {
        V3c::new(vec[0], vec[1], vec[2])
    }
}

impl From<nalgebra::Vector3<f64>> for V3c<f64> {
    fn from(vec: nalgebra::Vector3<f64>) -> V3c<f64> {
        V3c::new(vec.x, vec.y, vec.z)
    }
}

impl From<V3c<f64>> for nalgebra::Vector3<f64> {
    fn from(vec: V3c<f64>) -> nalgebra::Vector3<f64> {
        nalgebra::Vector3::new(vec.x, vec.y, vec.z)
    }
}
