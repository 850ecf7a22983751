use crate::algorithm::native::bounding_rect::BoundingRect;

/// Computes the total bounds (extent) of the input.
pub trait TotalBounds {
    fn total_bounds(&self) -> BoundingRect;
}

impl TotalBounds for [crate::geometry::Geometry] {
    fn total_bounds(&self) -> BoundingRect {
        let mut bounds = BoundingRect::new();
        for geom in self {
            bounds.add_geometry(geom);
        }
        bounds
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::native::Take;
    use crate::test::cities;

    #[test]
    fn cities_extent() {
        let table = cities::table();
        let bounds = table.total_bounds();
        assert_eq!(<[f64; 4]>::from(bounds), [88.6042, 22.3569, 91.8687, 25.7439]);
    }

    #[test]
    fn extent_of_subset() {
        let table = cities::table().take(&[0, 1]).unwrap();
        let bounds = table.total_bounds();
        assert_eq!(<[f64; 4]>::from(bounds), [90.3535, 22.701, 90.4125, 23.8101]);
    }

    #[test]
    fn empty_slice() {
        let geoms: Vec<crate::geometry::Geometry> = vec![];
        assert!(geoms.total_bounds().is_empty());
    }
}
