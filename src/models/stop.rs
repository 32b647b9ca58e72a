use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::geo::LatLng;

/// Parada del itinerario tal como la entrega el flujo de recomendación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    /// La columna del backend admite null
    #[serde(default, deserialize_with = "nullable_text")]
    pub description: String,
    #[serde(deserialize_with = "coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "coordinate")]
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_title: Option<String>,
    /// Campos que no usamos (address, category...) y se guardan tal cual
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Stop {
    pub fn new(name: &str, description: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            lat,
            lng,
            media_title: None,
            extra: Map::new(),
        }
    }

    pub fn with_media_title(mut self, title: &str) -> Self {
        self.media_title = Some(title.to_string());
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Título del drama/medio asociado, ignorando cadenas vacías
    pub fn media_title(&self) -> Option<&str> {
        self.media_title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// Secuencia ordenada de paradas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary(pub Vec<Stop>);

impl Itinerary {
    pub fn new(stops: Vec<Stop>) -> Self {
        Self(stops)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Stop>> for Itinerary {
    fn from(stops: Vec<Stop>) -> Self {
        Self(stops)
    }
}

fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Acepta coordenadas numéricas o como texto ("37.5796")
fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCoordinate {
        Number(f64),
        Text(String),
    }

    match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(value) => Ok(value),
        RawCoordinate::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid coordinate: {:?}", text))),
    }
}
