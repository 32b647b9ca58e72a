use serde::Serialize;

use super::MapError;
use crate::config::{MapConfig, RouteStyleConfig};
use crate::models::{LatLng, LatLngBounds};

/// Objeto dibujado sobre el mapa que se puede retirar
pub trait MapOverlay {
    fn detach(&self);
}

/// Mapa ya cargado + servicio de rutas. Todo corre en el hilo de UI.
pub trait MapBackend: 'static {
    type Marker: MapOverlay + 'static;
    type RouteLayer: MapOverlay + Clone + 'static;
    type Polyline: MapOverlay + 'static;
    type Directions: 'static;

    fn add_marker(&self, options: &MarkerOptions) -> Self::Marker;

    fn fit_bounds(&self, bounds: &LatLngBounds);

    /// Capa vacía donde se pintará la respuesta de direcciones
    fn add_route_layer(&self, options: &RouteLayerOptions) -> Self::RouteLayer;

    fn show_directions(&self, layer: &Self::RouteLayer, directions: Self::Directions);

    fn add_polyline(&self, options: &PolylineOptions) -> Self::Polyline;

    /// El callback se llama una sola vez, cuando el servicio responde
    fn request_route(
        &self,
        request: &RouteRequest,
        on_complete: Box<dyn FnOnce(Result<Self::Directions, RouteStatus>)>,
    );
}

/// Carga asíncrona del SDK y creación del mapa
#[allow(async_fn_in_trait)]
pub trait MapLoader {
    type Backend: MapBackend;

    async fn load(&self, options: &MapOptions) -> Result<Self::Backend, MapError>;
}

/// Estado devuelto por el servicio de direcciones cuando no es "OK"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStatus(pub String);

impl RouteStatus {
    pub const OK: &'static str = "OK";

    pub fn is_ok(&self) -> bool {
        self.0 == Self::OK
    }
}

impl std::fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Transit,
    Driving,
    Walking,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin: LatLng,
    pub destination: LatLng,
    pub travel_mode: TravelMode,
}

impl RouteRequest {
    pub fn transit(origin: LatLng, destination: LatLng) -> Self {
        Self {
            origin,
            destination,
            travel_mode: TravelMode::Transit,
        }
    }
}

// ---------------------------------------------------------------------------
// Opciones (serializadas tal cual al SDK)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(skip)]
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    #[serde(rename = "disableDefaultUI")]
    pub disable_default_ui: bool,
    pub styles: Vec<MapStyleRule>,
}

impl From<&MapConfig> for MapOptions {
    fn from(config: &MapConfig) -> Self {
        let styles = if config.hide_poi_labels {
            vec![MapStyleRule::hidden("poi")]
        } else {
            Vec::new()
        };

        Self {
            container_id: config.container_id.clone(),
            center: LatLng::new(config.default_center_lat, config.default_center_lng),
            zoom: config.default_zoom,
            disable_default_ui: config.disable_default_ui,
            styles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyleRule {
    pub feature_type: String,
    pub stylers: Vec<Styler>,
}

impl MapStyleRule {
    pub fn hidden(feature_type: &str) -> Self {
        Self {
            feature_type: feature_type.to_string(),
            stylers: vec![Styler {
                visibility: "off".to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Styler {
    pub visibility: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOptions {
    pub position: LatLng,
    pub title: String,
    pub label: MarkerLabel,
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerLabel {
    pub text: String,
    pub color: String,
    pub font_weight: String,
}

impl MarkerLabel {
    /// Número de orden en blanco y negrita
    pub fn numbered(position: usize) -> Self {
        Self {
            text: position.to_string(),
            color: "white".to_string(),
            font_weight: "bold".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLayerOptions {
    pub suppress_markers: bool,
    pub preserve_viewport: bool,
    pub polyline_options: StrokeStyle,
}

impl RouteLayerOptions {
    pub fn transit(style: &RouteStyleConfig) -> Self {
        Self {
            suppress_markers: true,
            preserve_viewport: true,
            polyline_options: StrokeStyle {
                stroke_color: style.color.clone(),
                stroke_weight: style.transit_weight,
                stroke_opacity: style.transit_opacity,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub stroke_color: String,
    pub stroke_weight: u32,
    pub stroke_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineOptions {
    pub path: Vec<LatLng>,
    #[serde(flatten)]
    pub stroke: StrokeStyle,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<IconSequence>,
}

impl PolylineOptions {
    /// Línea recta punteada entre dos paradas (cuando no hay ruta de transporte)
    pub fn dashed(from: LatLng, to: LatLng, style: &RouteStyleConfig) -> Self {
        Self {
            path: vec![from, to],
            stroke: StrokeStyle {
                stroke_color: style.color.clone(),
                stroke_weight: style.fallback_weight,
                stroke_opacity: style.fallback_opacity,
            },
            icons: vec![IconSequence {
                icon: DashSymbol {
                    path: "M 0,-1 0,1".to_string(),
                    stroke_opacity: 1.0,
                    scale: 2.0,
                },
                offset: "0".to_string(),
                repeat: style.dash_repeat.clone(),
            }],
        }
    }

    pub fn is_dashed(&self) -> bool {
        !self.icons.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconSequence {
    pub icon: DashSymbol,
    pub offset: String,
    pub repeat: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashSymbol {
    pub path: String,
    pub stroke_opacity: f64,
    pub scale: f64,
}
