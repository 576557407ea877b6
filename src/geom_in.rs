//! Input geometry: rings, polygons, and multipolygons, converted into
//! segments as they are loaded.
//!
//! Loading validates as it goes: coordinates must be finite, a polygon must
//! have at least one ring, and a ring must produce at least one segment once
//! repeated points are dropped. The closing edge back to the first point is
//! implied, so rings may arrive open or closed.

use crate::geom::Bbox;
use crate::operation::Operation;
use crate::segment::SegIdx;
use crate::{Error, Geometry};

typed_idx!(
    /// Handle to a [`RingIn`].
    RingIdx,
    "r"
);

typed_idx!(
    /// Handle to a [`PolyIn`].
    PolyIdx,
    "p"
);

typed_idx!(
    /// Handle to a [`MultiPolyIn`].
    MultiPolyIdx,
    "mp"
);

/// One input ring, already cut into segments.
#[derive(Debug)]
pub(crate) struct RingIn {
    pub segments: Vec<SegIdx>,
    pub poly: PolyIdx,
    pub is_exterior: bool,
    pub bbox: Bbox,
}

/// One input polygon: an exterior ring plus any holes.
#[derive(Debug)]
pub(crate) struct PolyIn {
    pub exterior: RingIdx,
    pub interiors: Vec<RingIdx>,
    pub multipoly: MultiPolyIdx,
    /// Covers the interiors too; a hole ring is allowed to poke outside its
    /// exterior.
    pub bbox: Bbox,
}

/// One input operand. An empty multipolygon is legal and contributes
/// nothing.
#[derive(Debug)]
pub(crate) struct MultiPolyIn {
    pub polys: Vec<PolyIdx>,
    pub is_subject: bool,
    pub bbox: Bbox,
}

impl Operation {
    /// Loads one operand, normalizing a bare polygon to a one-polygon
    /// multipolygon.
    pub(crate) fn add_geometry(
        &mut self,
        geom: &Geometry,
        is_subject: bool,
    ) -> Result<MultiPolyIdx, Error> {
        let polys: &[Vec<Vec<[f64; 2]>>] = match geom {
            Geometry::Polygon(poly) => std::slice::from_ref(poly),
            Geometry::MultiPolygon(polys) => polys,
        };
        self.add_multipoly(polys, is_subject)
    }

    fn add_multipoly(
        &mut self,
        geom: &[Vec<Vec<[f64; 2]>>],
        is_subject: bool,
    ) -> Result<MultiPolyIdx, Error> {
        let mp = self.multipolys.next_idx();
        let mut bbox = Bbox {
            ll: crate::geom::Point::new(f64::INFINITY, f64::INFINITY),
            ur: crate::geom::Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        };
        let mut polys = Vec::with_capacity(geom.len());
        for poly_coords in geom {
            let poly = self.add_poly(poly_coords, mp)?;
            bbox.merge(&self.polys[poly].bbox);
            polys.push(poly);
        }
        Ok(self.multipolys.push(MultiPolyIn {
            polys,
            is_subject,
            bbox,
        }))
    }

    fn add_poly(
        &mut self,
        rings: &[Vec<[f64; 2]>],
        multipoly: MultiPolyIdx,
    ) -> Result<PolyIdx, Error> {
        let Some((exterior_coords, interior_coords)) = rings.split_first() else {
            return Err(Error::EmptyPolygon);
        };
        let poly = self.polys.next_idx();
        let exterior = self.add_ring(exterior_coords, poly, true)?;
        let mut bbox = self.rings[exterior].bbox;
        let mut interiors = Vec::with_capacity(interior_coords.len());
        for coords in interior_coords {
            let interior = self.add_ring(coords, poly, false)?;
            bbox.merge(&self.rings[interior].bbox);
            interiors.push(interior);
        }
        Ok(self.polys.push(PolyIn {
            exterior,
            interiors,
            multipoly,
            bbox,
        }))
    }

    fn add_ring(
        &mut self,
        coords: &[[f64; 2]],
        poly: PolyIdx,
        is_exterior: bool,
    ) -> Result<RingIdx, Error> {
        let Some((&[x0, y0], rest)) = coords.split_first() else {
            return Err(Error::EmptyRing);
        };
        if !x0.is_finite() || !y0.is_finite() {
            return Err(Error::NonFiniteCoordinate { x: x0, y: y0 });
        }

        let ring = self.rings.next_idx();
        let first = self.rounder.round(x0, y0);
        let mut bbox = Bbox::at(first);
        let mut prev = first;
        let mut segments = Vec::new();

        for &[x, y] in rest {
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::NonFiniteCoordinate { x, y });
            }
            let point = self.rounder.round(x, y);
            // repeated points would make zero-length segments
            if point == prev {
                continue;
            }
            segments.push(self.segment_from_ring(prev, point, ring));
            bbox.expand(point);
            prev = point;
        }

        // close the ring if the input left it open
        if first != prev {
            segments.push(self.segment_from_ring(prev, first, ring));
        }

        if segments.is_empty() {
            return Err(Error::DegenerateRing {
                x: first.x,
                y: first.y,
            });
        }

        Ok(self.rings.push(RingIn {
            segments,
            poly,
            is_exterior,
            bbox,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{Limits, OpType};

    fn ctx() -> Operation {
        Operation::new(OpType::Union, Limits::default())
    }

    fn square() -> Vec<Vec<[f64; 2]>> {
        vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]
    }

    #[test]
    fn open_ring_is_closed_implicitly() {
        let mut c = ctx();
        let mp = c.add_geometry(&Geometry::Polygon(square()), true).unwrap();
        let poly = c.multipolys[mp].polys[0];
        let exterior = c.polys[poly].exterior;
        assert_eq!(c.rings[exterior].segments.len(), 4);
        assert!(c.rings[exterior].is_exterior);
    }

    #[test]
    fn pre_closed_ring_gets_same_segments() {
        let mut c = ctx();
        let mut coords = square();
        coords[0].push([0.0, 0.0]);
        let mp = c.add_geometry(&Geometry::Polygon(coords), true).unwrap();
        let poly = c.multipolys[mp].polys[0];
        let exterior = c.polys[poly].exterior;
        assert_eq!(c.rings[exterior].segments.len(), 4);
    }

    #[test]
    fn repeated_points_are_dropped() {
        let mut c = ctx();
        let coords = vec![vec![
            [0.0, 0.0],
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [1.0, 1.0],
            [0.0, 1.0],
        ]];
        let mp = c.add_geometry(&Geometry::Polygon(coords), true).unwrap();
        let poly = c.multipolys[mp].polys[0];
        let exterior = c.polys[poly].exterior;
        assert_eq!(c.rings[exterior].segments.len(), 4);
    }

    #[test]
    fn nan_coordinate_is_rejected() {
        let mut c = ctx();
        let coords = vec![vec![[0.0, 0.0], [f64::NAN, 1.0], [1.0, 1.0]]];
        let err = c.add_geometry(&Geometry::Polygon(coords), true).unwrap_err();
        assert!(matches!(err, Error::NonFiniteCoordinate { .. }));
    }

    #[test]
    fn empty_structures_are_rejected() {
        let mut c = ctx();
        assert_eq!(
            c.add_geometry(&Geometry::Polygon(vec![]), true).unwrap_err(),
            Error::EmptyPolygon
        );
        let mut c = ctx();
        assert_eq!(
            c.add_geometry(&Geometry::Polygon(vec![vec![]]), true)
                .unwrap_err(),
            Error::EmptyRing
        );
    }

    #[test]
    fn all_identical_points_is_degenerate() {
        let mut c = ctx();
        let coords = vec![vec![[2.0, 3.0], [2.0, 3.0], [2.0, 3.0]]];
        let err = c.add_geometry(&Geometry::Polygon(coords), true).unwrap_err();
        assert!(matches!(err, Error::DegenerateRing { x, y } if x == 2.0 && y == 3.0));
    }

    #[test]
    fn poly_bbox_covers_interiors() {
        let mut c = ctx();
        let coords = vec![
            vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
            vec![[1.0, 1.0], [1.0, 5.0], [2.0, 5.0], [2.0, 1.0]],
        ];
        let mp = c.add_geometry(&Geometry::Polygon(coords), true).unwrap();
        let bbox = c.multipolys[mp].bbox;
        assert_eq!(bbox.ur.y, 5.0);
    }

    #[test]
    fn empty_multipolygon_is_fine() {
        let mut c = ctx();
        let mp = c
            .add_geometry(&Geometry::MultiPolygon(vec![]), true)
            .unwrap();
        assert!(c.multipolys[mp].polys.is_empty());
    }
}
