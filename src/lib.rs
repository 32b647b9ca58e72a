// ============================================================================
// K-TRIP PLANNER - FRONTEND RUST + WASM
// ============================================================================
// - Models: paradas, itinerarios y viajes guardados
// - Maps: sesión del mapa (Google Maps) y renderer de rutas
// - ViewModels / Views: lista de resultados
// - Services: historial en localStorage
// - App: contexto explícito que une todo
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod maps;
pub mod models;
pub mod services;
pub mod utils;
pub mod viewmodels;
pub mod views;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::TripApp;
use crate::config::CONFIG;
use crate::maps::google::{GoogleMapBackend, GoogleMapLoader};
use crate::maps::DrawOutcome;
use crate::models::Stop;
use crate::utils::storage::LocalStorage;

pub type BrowserApp = TripApp<GoogleMapBackend, LocalStorage>;

// Única instancia, creada en el arranque del módulo WASM
thread_local! {
    static APP: RefCell<Option<Rc<BrowserApp>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::default());
    log::info!("🚀 K-Trip Planner - Rust + WASM");

    // El mapa lo arranca la página con initMap()
    let app = Rc::new(BrowserApp::new(CONFIG.clone(), LocalStorage));
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    Ok(())
}

fn current_app() -> Option<Rc<BrowserApp>> {
    let app = APP.with(|cell| cell.borrow().clone());
    if app.is_none() {
        log::warn!("⚠️ [MAIN] App no está inicializada");
    }
    app
}

/// null/undefined = sin paradas
fn parse_stops(spots: JsValue) -> Result<Option<Vec<Stop>>, JsValue> {
    if spots.is_null() || spots.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value::<Option<Vec<Stop>>>(spots).map_err(JsValue::from)
}

fn notify(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// Inicializa (o reintenta) el mapa. Devuelve si quedó listo; `false` sin error
/// cuando otra llamada ya lo está cargando.
#[wasm_bindgen(js_name = initMap)]
pub async fn init_map() -> bool {
    let Some(app) = current_app() else {
        return false;
    };
    match app.start_map(&GoogleMapLoader).await {
        Ok(ready) => ready,
        Err(e) => {
            log::error!("❌ [MAIN] Error inicializando mapa: {}", e);
            app.session().is_ready()
        }
    }
}

#[wasm_bindgen(js_name = drawRouteOnMap)]
pub fn draw_route_on_map(spots: JsValue) -> Result<bool, JsValue> {
    let Some(app) = current_app() else {
        return Ok(false);
    };
    let stops = parse_stops(spots)?;
    let outcome = app.draw_route(stops.as_deref());
    Ok(matches!(outcome, DrawOutcome::Drawn { .. }))
}

#[wasm_bindgen(js_name = renderResult)]
pub fn render_result(spots: JsValue) -> Result<(), JsValue> {
    let Some(app) = current_app() else {
        return Ok(());
    };
    let stops = parse_stops(spots)?;
    app.render_results(stops.as_deref())
}

/// Mapa + lista en una sola llamada
#[wasm_bindgen(js_name = showItinerary)]
pub fn show_itinerary(spots: JsValue) -> Result<(), JsValue> {
    let Some(app) = current_app() else {
        return Ok(());
    };
    let stops = parse_stops(spots)?;
    app.show_itinerary(stops.as_deref()).map(|_| ())
}

/// Guarda el itinerario actual y avisa al usuario del resultado
#[wasm_bindgen(js_name = saveRoute)]
pub fn save_route() -> bool {
    let Some(app) = current_app() else {
        return false;
    };
    match app.save_current_trip() {
        Ok(_) => {
            notify("Trip Saved Successfully! 💖");
            true
        }
        Err(e) => {
            log::error!("❌ [MAIN] Error guardando viaje: {}", e);
            notify(&e.to_string());
            false
        }
    }
}

/// Historial guardado como array JS (el más reciente primero)
#[wasm_bindgen(js_name = savedTrips)]
pub fn saved_trips() -> Result<JsValue, JsValue> {
    let Some(app) = current_app() else {
        return Ok(js_sys::Array::new().into());
    };
    let history = app
        .saved_trips()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    serde::Serialize::serialize(&history, &serializer).map_err(JsValue::from)
}
