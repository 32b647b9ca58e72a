// ============================================================================
// GOOGLE MAPS FFI - Bindings al SDK de Google Maps JavaScript
// ============================================================================
// Solo wrappers finos: la lógica vive en session.rs y renderer.rs
// ============================================================================

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{
    MapBackend, MapError, MapLoader, MapOptions, MapOverlay, MarkerOptions, PolylineOptions,
    RouteLayerOptions, RouteRequest, RouteStatus,
};
use crate::dom::get_element_by_id;
use crate::models::LatLngBounds;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = importLibrary, catch)]
    async fn import_library(name: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    #[derive(Clone)]
    pub type GoogleMap;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Map", catch)]
    fn new(container: &web_sys::Element, options: &JsValue) -> Result<GoogleMap, JsValue>;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &GoogleMap, bounds: &JsValue);

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Marker)]
    #[derive(Clone)]
    pub type GoogleMarker;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Marker")]
    fn new(options: &JsValue) -> GoogleMarker;

    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &GoogleMarker, map: &JsValue);

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Polyline)]
    #[derive(Clone)]
    pub type GooglePolyline;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Polyline")]
    fn new(options: &JsValue) -> GooglePolyline;

    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &GooglePolyline, map: &JsValue);

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = DirectionsService)]
    #[derive(Clone)]
    pub type DirectionsService;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "DirectionsService", catch)]
    fn new() -> Result<DirectionsService, JsValue>;

    #[wasm_bindgen(method)]
    fn route(this: &DirectionsService, request: &JsValue, callback: &JsValue);

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = DirectionsRenderer)]
    #[derive(Clone)]
    pub type DirectionsRenderer;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "DirectionsRenderer")]
    fn new(options: &JsValue) -> DirectionsRenderer;

    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &DirectionsRenderer, map: &JsValue);

    #[wasm_bindgen(method, js_name = setDirections)]
    fn set_directions(this: &DirectionsRenderer, directions: &JsValue);
}

/// Serializa opciones como objeto JS plano (no Map) para el SDK
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsValue::from)
}

/// Opciones + referencia al mapa donde se dibuja el objeto
fn attached_to<T: Serialize>(value: &T, map: &GoogleMap) -> Result<JsValue, JsValue> {
    let options = to_js(value)?;
    js_sys::Reflect::set(&options, &JsValue::from_str("map"), map.as_ref())?;
    Ok(options)
}

impl MapOverlay for GoogleMarker {
    fn detach(&self) {
        self.set_map(&JsValue::NULL);
    }
}

impl MapOverlay for GooglePolyline {
    fn detach(&self) {
        self.set_map(&JsValue::NULL);
    }
}

impl MapOverlay for DirectionsRenderer {
    fn detach(&self) {
        self.set_map(&JsValue::NULL);
    }
}

/// Mapa de Google listo para dibujar
pub struct GoogleMapBackend {
    map: GoogleMap,
    directions: DirectionsService,
}

impl GoogleMapBackend {
    fn options_for<T: Serialize>(&self, value: &T) -> JsValue {
        attached_to(value, &self.map).unwrap_or_else(|e| {
            log::error!("❌ [MAP] Error serializando opciones: {:?}", e);
            JsValue::UNDEFINED
        })
    }
}

impl MapBackend for GoogleMapBackend {
    type Marker = GoogleMarker;
    type RouteLayer = DirectionsRenderer;
    type Polyline = GooglePolyline;
    type Directions = JsValue;

    fn add_marker(&self, options: &MarkerOptions) -> GoogleMarker {
        GoogleMarker::new(&self.options_for(options))
    }

    fn fit_bounds(&self, bounds: &LatLngBounds) {
        match to_js(bounds) {
            Ok(literal) => self.map.fit_bounds(&literal),
            Err(e) => log::error!("❌ [MAP] Bounds inválidos: {:?}", e),
        }
    }

    fn add_route_layer(&self, options: &RouteLayerOptions) -> DirectionsRenderer {
        DirectionsRenderer::new(&self.options_for(options))
    }

    fn show_directions(&self, layer: &DirectionsRenderer, directions: JsValue) {
        layer.set_directions(&directions);
    }

    fn add_polyline(&self, options: &PolylineOptions) -> GooglePolyline {
        GooglePolyline::new(&self.options_for(options))
    }

    fn request_route(
        &self,
        request: &RouteRequest,
        on_complete: Box<dyn FnOnce(Result<JsValue, RouteStatus>)>,
    ) {
        let request = match to_js(request) {
            Ok(request) => request,
            Err(e) => {
                log::error!("❌ [MAP] Error serializando petición de ruta: {:?}", e);
                on_complete(Err(RouteStatus("INVALID_REQUEST".to_string())));
                return;
            }
        };

        let callback = Closure::once_into_js(move |response: JsValue, status: JsValue| {
            let status = RouteStatus(status.as_string().unwrap_or_else(|| "UNKNOWN_ERROR".to_string()));
            if status.is_ok() {
                on_complete(Ok(response));
            } else {
                on_complete(Err(status));
            }
        });

        self.directions.route(&request, &callback);
    }
}

/// Carga las librerías "maps" y "routes" y crea el mapa en el contenedor
#[derive(Default)]
pub struct GoogleMapLoader;

impl MapLoader for GoogleMapLoader {
    type Backend = GoogleMapBackend;

    async fn load(&self, options: &MapOptions) -> Result<GoogleMapBackend, MapError> {
        for library in ["maps", "routes"] {
            import_library(library)
                .await
                .map_err(|e| MapError::SdkLoad(format!("{}: {:?}", library, e)))?;
        }

        let container = get_element_by_id(&options.container_id)
            .ok_or_else(|| MapError::ContainerNotFound(options.container_id.clone()))?;

        let map = GoogleMap::new(&container, &to_js(options)?)?;
        let directions = DirectionsService::new()?;

        Ok(GoogleMapBackend { map, directions })
    }
}
