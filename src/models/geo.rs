use serde::{Deserialize, Serialize};

/// Coordenadas en el formato literal de Google Maps ({lat, lng})
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Rectángulo envolvente ({north, south, east, west})
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl LatLngBounds {
    pub fn from_point(point: LatLng) -> Self {
        Self {
            north: point.lat,
            south: point.lat,
            east: point.lng,
            west: point.lng,
        }
    }

    pub fn extend(&mut self, point: LatLng) {
        self.north = self.north.max(point.lat);
        self.south = self.south.min(point.lat);
        self.east = self.east.max(point.lng);
        self.west = self.west.min(point.lng);
    }

    /// None si no hay puntos
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_every_point() {
        let points = [
            LatLng::new(37.5796, 126.9770),
            LatLng::new(37.5826, 126.9850),
            LatLng::new(37.5743, 126.9895),
        ];

        let bounds = LatLngBounds::from_points(points).unwrap();

        assert_eq!(bounds.north, 37.5826);
        assert_eq!(bounds.south, 37.5743);
        assert_eq!(bounds.east, 126.9895);
        assert_eq!(bounds.west, 126.9770);
        assert!(points.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn no_points_no_bounds() {
        assert_eq!(LatLngBounds::from_points(Vec::new()), None);
    }
}
