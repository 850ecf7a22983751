use geo::{polygon, LineString, Polygon};

use crate::geometry::Geometry;

/// The 2x2 square with its lower-left corner at the origin.
pub(crate) fn square() -> Geometry {
    polygon![
        (x: 0., y: 0.),
        (x: 2., y: 0.),
        (x: 2., y: 2.),
        (x: 0., y: 2.),
    ]
    .into()
}

/// A 4x4 square with a 2x2 hole in the middle.
pub(crate) fn square_with_hole() -> Geometry {
    Polygon::new(
        LineString::from(vec![(0., 0.), (4., 0.), (4., 4.), (0., 4.), (0., 0.)]),
        vec![LineString::from(vec![
            (1., 1.),
            (1., 3.),
            (3., 3.),
            (3., 1.),
            (1., 1.),
        ])],
    )
    .into()
}
