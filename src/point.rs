// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// A two dimensional point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point2<T: Into<f64>> {
    pub x: T,
    pub y: T,
}

/// A three dimensional point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point3<T: Into<f64>> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Into<f64>> Point2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Point2 { x, y }
    }

    pub(crate) fn to_f64(self) -> Point2<f64> {
        Point2 {
            x: self.x.into(),
            y: self.y.into(),
        }
    }
}

impl<T: Into<f64>> Point3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Point3 { x, y, z }
    }

    pub(crate) fn to_f64(self) -> Point3<f64> {
        Point3 {
            x: self.x.into(),
            y: self.y.into(),
            z: self.z.into(),
        }
    }
}

impl<T: Into<f64>> From<[T; 2]> for Point2<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Point2 { x, y }
    }
}

impl<T: Into<f64>> From<(T, T)> for Point2<T> {
    fn from((x, y): (T, T)) -> Self {
        Point2 { x, y }
    }
}

impl<T: Into<f64>> From<[T; 3]> for Point3<T> {
    fn from([x, y, z]: [T; 3]) -> Self {
        Point3 { x, y, z }
    }
}

impl<T: Into<f64>> From<(T, T, T)> for Point3<T> {
    fn from((x, y, z): (T, T, T)) -> Self {
        Point3 { x, y, z }
    }
}
