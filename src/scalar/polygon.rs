use geo::Polygon;

use crate::scalar::Part;

/// The rings of one polygon: an outer ring followed by its holes.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRings<'a> {
    pub(crate) exterior: Part<'a>,
    pub(crate) interiors: Vec<Part<'a>>,
}

impl<'a> PolygonRings<'a> {
    pub fn exterior(&self) -> &Part<'a> {
        &self.exterior
    }

    pub fn interiors(&self) -> &[Part<'a>] {
        &self.interiors
    }

    pub fn num_interiors(&self) -> usize {
        self.interiors.len()
    }

    /// Convert to a [`geo::Polygon`]. Rings are closed if they are not already.
    pub fn to_polygon(&self) -> Polygon<f32> {
        Polygon::new(
            self.exterior.to_line_string(),
            self.interiors.iter().map(|r| r.to_line_string()).collect(),
        )
    }
}
