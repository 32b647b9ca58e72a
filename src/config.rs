use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub map: MapConfig,
    pub route_style: RouteStyleConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
}

/// Vista inicial del mapa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub container_id: String,
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: u8,
    pub disable_default_ui: bool,
    pub hide_poi_labels: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map-container".to_string(),
            default_center_lat: 37.5665, // Seúl
            default_center_lng: 126.9780,
            default_zoom: 11,
            disable_default_ui: true,
            hide_poi_labels: true,
        }
    }
}

/// Estilo de los tramos: ruta en transporte público y línea punteada de respaldo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStyleConfig {
    pub color: String,
    pub transit_weight: u32,
    pub transit_opacity: f64,
    pub fallback_weight: u32,
    pub fallback_opacity: f64,
    pub dash_repeat: String,
    pub marker_z_index_base: i32,
}

impl Default for RouteStyleConfig {
    fn default() -> Self {
        Self {
            color: "#6366f1".to_string(),
            transit_weight: 5,
            transit_opacity: 0.8,
            fallback_weight: 2,
            fallback_opacity: 0.5,
            dash_repeat: "10px".to_string(),
            marker_z_index_base: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub current_itinerary_key: String,
    pub saved_trips_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            current_itinerary_key: "currentSpots".to_string(),
            saved_trips_key: "ktrip_saved_routes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub result_container_id: String,
    pub default_media_label: String,
    pub empty_results_message: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            result_container_id: "result-container".to_string(),
            default_media_label: "K-Place".to_string(),
            empty_results_message: "No spots found.".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            map: MapConfig {
                container_id: env_string(option_env!("KTRIP_MAP_CONTAINER_ID"), defaults.map.container_id),
                default_center_lat: env_parse(option_env!("KTRIP_MAP_CENTER_LAT"), defaults.map.default_center_lat),
                default_center_lng: env_parse(option_env!("KTRIP_MAP_CENTER_LNG"), defaults.map.default_center_lng),
                default_zoom: env_parse(option_env!("KTRIP_MAP_ZOOM"), defaults.map.default_zoom),
                disable_default_ui: env_parse(option_env!("KTRIP_MAP_DISABLE_DEFAULT_UI"), defaults.map.disable_default_ui),
                hide_poi_labels: env_parse(option_env!("KTRIP_MAP_HIDE_POI"), defaults.map.hide_poi_labels),
            },
            route_style: RouteStyleConfig {
                color: env_string(option_env!("KTRIP_ROUTE_COLOR"), defaults.route_style.color),
                transit_weight: env_parse(option_env!("KTRIP_ROUTE_WEIGHT"), defaults.route_style.transit_weight),
                fallback_weight: env_parse(option_env!("KTRIP_FALLBACK_WEIGHT"), defaults.route_style.fallback_weight),
                ..defaults.route_style
            },
            storage: StorageConfig {
                current_itinerary_key: env_string(option_env!("KTRIP_CURRENT_SPOTS_KEY"), defaults.storage.current_itinerary_key),
                saved_trips_key: env_string(option_env!("KTRIP_SAVED_TRIPS_KEY"), defaults.storage.saved_trips_key),
            },
            ui: UiConfig {
                result_container_id: env_string(option_env!("KTRIP_RESULT_CONTAINER_ID"), defaults.ui.result_container_id),
                ..defaults.ui
            },
        }
    }
}

fn env_string(value: Option<&str>, default: String) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
