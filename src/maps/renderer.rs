// ============================================================================
// MAP RENDERER - Marcadores, tramos y encuadre del itinerario
// ============================================================================
// Un único conjunto de decoraciones vivo. Cada dibujo abre una "generación";
// las respuestas de rutas de generaciones anteriores se descartan.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{
    MapBackend, MapOverlay, MapSession, MarkerLabel, MarkerOptions, PolylineOptions,
    RouteLayerOptions, RouteRequest,
};
use crate::config::RouteStyleConfig;
use crate::models::{LatLngBounds, Stop};

/// Decoraciones actualmente sobre el mapa
struct DecorationSet<B: MapBackend> {
    markers: Vec<B::Marker>,
    routes: Vec<B::RouteLayer>,
    fallbacks: Vec<B::Polyline>,
}

impl<B: MapBackend> DecorationSet<B> {
    fn new() -> Self {
        Self {
            markers: Vec::new(),
            routes: Vec::new(),
            fallbacks: Vec::new(),
        }
    }

    fn detach_all(&mut self) {
        for marker in self.markers.drain(..) {
            marker.detach();
        }
        for route in self.routes.drain(..) {
            route.detach();
        }
        for line in self.fallbacks.drain(..) {
            line.detach();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotReady,
    NoStops,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Skipped(SkipReason),
    Drawn {
        generation: u64,
        markers: usize,
        segments: usize,
    },
}

pub struct MapRenderer<B: MapBackend> {
    style: RouteStyleConfig,
    decorations: Rc<RefCell<DecorationSet<B>>>,
    generation: Rc<Cell<u64>>,
}

impl<B: MapBackend> MapRenderer<B> {
    pub fn new(style: RouteStyleConfig) -> Self {
        Self {
            style,
            decorations: Rc::new(RefCell::new(DecorationSet::new())),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Retira todo lo dibujado e invalida las respuestas pendientes
    pub fn clear(&self) -> u64 {
        self.decorations.borrow_mut().detach_all();
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    /// Dibuja el itinerario. Sin mapa listo o sin paradas no toca nada.
    pub fn draw_route(&self, session: &MapSession<B>, stops: Option<&[Stop]>) -> DrawOutcome {
        let Some(backend) = session.backend() else {
            log::warn!("⚠️ [MAP] Mapa no inicializado, no se dibuja la ruta");
            return DrawOutcome::Skipped(SkipReason::NotReady);
        };
        let stops = match stops {
            Some(stops) if !stops.is_empty() => stops,
            _ => return DrawOutcome::Skipped(SkipReason::NoStops),
        };

        let generation = self.clear();
        log::info!("🗺️ [MAP] Dibujando {} paradas (generación {})", stops.len(), generation);

        let positions: Vec<_> = stops.iter().map(Stop::position).collect();

        {
            let mut decorations = self.decorations.borrow_mut();
            for (index, stop) in stops.iter().enumerate() {
                let marker = backend.add_marker(&MarkerOptions {
                    position: positions[index],
                    title: stop.name.clone(),
                    label: MarkerLabel::numbered(index + 1),
                    z_index: self.style.marker_z_index_base + index as i32,
                });
                decorations.markers.push(marker);
            }
        }

        if let Some(bounds) = LatLngBounds::from_points(positions.iter().copied()) {
            backend.fit_bounds(&bounds);
        }

        let layer_options = RouteLayerOptions::transit(&self.style);
        let mut segments = 0;

        for pair in positions.windows(2) {
            let (start, end) = (pair[0], pair[1]);

            let layer = backend.add_route_layer(&layer_options);
            self.decorations.borrow_mut().routes.push(layer.clone());

            let fallback = PolylineOptions::dashed(start, end, &self.style);
            let backend_cb = backend.clone();
            let decorations = self.decorations.clone();
            let current_generation = self.generation.clone();

            backend.request_route(
                &RouteRequest::transit(start, end),
                Box::new(move |response| {
                    if current_generation.get() != generation {
                        log::debug!("🗑️ [MAP] Respuesta de ruta obsoleta (generación {}), descartada", generation);
                        return;
                    }

                    match response {
                        Ok(directions) => backend_cb.show_directions(&layer, directions),
                        Err(status) => {
                            log::warn!("⚠️ [MAP] Sin ruta en transporte público ({}), usando línea recta", status);
                            let line = backend_cb.add_polyline(&fallback);
                            decorations.borrow_mut().fallbacks.push(line);
                        }
                    }
                }),
            );
            segments += 1;
        }

        DrawOutcome::Drawn {
            generation,
            markers: stops.len(),
            segments,
        }
    }
}
