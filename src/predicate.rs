// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::fmt;

/// The closed set of predicates offered by this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    Orient2D,
    Orient3D,
    InCircle,
    InSphere,
}

impl Predicate {
    /// Dimension of the input points.
    pub const fn dimension(self) -> usize {
        match self {
            Predicate::Orient2D | Predicate::InCircle => 2,
            Predicate::Orient3D | Predicate::InSphere => 3,
        }
    }

    /// Number of points the predicate takes.
    pub const fn arity(self) -> usize {
        match self {
            Predicate::Orient2D => 3,
            Predicate::Orient3D | Predicate::InCircle => 4,
            Predicate::InSphere => 5,
        }
    }

    /// Lowercase function name, as used by [`Display`](fmt::Display).
    pub const fn name(self) -> &'static str {
        match self {
            Predicate::Orient2D => "orient2d",
            Predicate::Orient3D => "orient3d",
            Predicate::InCircle => "incircle",
            Predicate::InSphere => "insphere",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
