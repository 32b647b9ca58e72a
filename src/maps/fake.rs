// Backend de mapa en memoria para tests: registra lo dibujado y retiene los
// callbacks de rutas para resolverlos a mano, en cualquier orden.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{
    MapBackend, MapError, MapLoader, MapOptions, MapOverlay, MarkerOptions, PolylineOptions,
    RouteLayerOptions, RouteRequest, RouteStatus,
};
use crate::models::LatLngBounds;

type RouteCallback = Box<dyn FnOnce(Result<String, RouteStatus>)>;

#[derive(Clone)]
pub(crate) struct FakeHandle {
    attached: Rc<Cell<bool>>,
}

impl FakeHandle {
    fn attached() -> Self {
        Self {
            attached: Rc::new(Cell::new(true)),
        }
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

impl MapOverlay for FakeHandle {
    fn detach(&self) {
        self.attached.set(false);
    }
}

#[derive(Clone)]
pub(crate) struct FakeLayer {
    handle: FakeHandle,
    directions: Rc<RefCell<Option<String>>>,
}

impl MapOverlay for FakeLayer {
    fn detach(&self) {
        self.handle.detach();
    }
}

pub(crate) struct FakeMap {
    options: MapOptions,
    markers: RefCell<Vec<(MarkerOptions, FakeHandle)>>,
    layers: RefCell<Vec<FakeLayer>>,
    polylines: RefCell<Vec<(PolylineOptions, FakeHandle)>>,
    bounds: RefCell<Option<LatLngBounds>>,
    requests: RefCell<Vec<RouteRequest>>,
    callbacks: RefCell<Vec<Option<RouteCallback>>>,
}

impl FakeMap {
    pub(crate) fn new(options: MapOptions) -> Self {
        Self {
            options,
            markers: RefCell::new(Vec::new()),
            layers: RefCell::new(Vec::new()),
            polylines: RefCell::new(Vec::new()),
            bounds: RefCell::new(None),
            requests: RefCell::new(Vec::new()),
            callbacks: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn options(&self) -> &MapOptions {
        &self.options
    }

    pub(crate) fn attached_marker_labels(&self) -> Vec<String> {
        self.markers
            .borrow()
            .iter()
            .filter(|(_, handle)| handle.is_attached())
            .map(|(options, _)| options.label.text.clone())
            .collect()
    }

    pub(crate) fn marker_z_indexes(&self) -> Vec<i32> {
        self.markers
            .borrow()
            .iter()
            .filter(|(_, handle)| handle.is_attached())
            .map(|(options, _)| options.z_index)
            .collect()
    }

    pub(crate) fn attached_route_layers(&self) -> usize {
        self.layers
            .borrow()
            .iter()
            .filter(|layer| layer.handle.is_attached())
            .count()
    }

    /// Direcciones pintadas en cada capa creada, en orden de creación
    pub(crate) fn route_directions(&self) -> Vec<Option<String>> {
        self.layers
            .borrow()
            .iter()
            .map(|layer| layer.directions.borrow().clone())
            .collect()
    }

    pub(crate) fn attached_polylines(&self) -> Vec<PolylineOptions> {
        self.polylines
            .borrow()
            .iter()
            .filter(|(_, handle)| handle.is_attached())
            .map(|(options, _)| options.clone())
            .collect()
    }

    pub(crate) fn last_bounds(&self) -> Option<LatLngBounds> {
        *self.bounds.borrow()
    }

    pub(crate) fn requests(&self) -> Vec<RouteRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn pending_requests(&self) -> usize {
        self.callbacks.borrow().iter().filter(|cb| cb.is_some()).count()
    }

    /// Entrega la respuesta de la petición `index` (orden de emisión)
    pub(crate) fn resolve(&self, index: usize, response: Result<String, RouteStatus>) {
        let callback = self.callbacks.borrow_mut()[index]
            .take()
            .expect("route request already resolved");
        callback(response);
    }
}

impl MapBackend for FakeMap {
    type Marker = FakeHandle;
    type RouteLayer = FakeLayer;
    type Polyline = FakeHandle;
    type Directions = String;

    fn add_marker(&self, options: &MarkerOptions) -> FakeHandle {
        let handle = FakeHandle::attached();
        self.markers.borrow_mut().push((options.clone(), handle.clone()));
        handle
    }

    fn fit_bounds(&self, bounds: &LatLngBounds) {
        *self.bounds.borrow_mut() = Some(*bounds);
    }

    fn add_route_layer(&self, _options: &RouteLayerOptions) -> FakeLayer {
        let layer = FakeLayer {
            handle: FakeHandle::attached(),
            directions: Rc::new(RefCell::new(None)),
        };
        self.layers.borrow_mut().push(layer.clone());
        layer
    }

    fn show_directions(&self, layer: &FakeLayer, directions: String) {
        *layer.directions.borrow_mut() = Some(directions);
    }

    fn add_polyline(&self, options: &PolylineOptions) -> FakeHandle {
        let handle = FakeHandle::attached();
        self.polylines.borrow_mut().push((options.clone(), handle.clone()));
        handle
    }

    fn request_route(&self, request: &RouteRequest, on_complete: RouteCallback) {
        self.requests.borrow_mut().push(request.clone());
        self.callbacks.borrow_mut().push(Some(on_complete));
    }
}

#[derive(Default)]
pub(crate) struct FakeLoader {
    calls: Cell<usize>,
    failure: Option<MapError>,
    yield_first: bool,
}

impl FakeLoader {
    pub(crate) fn failing(error: MapError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Cede el control una vez antes de terminar la carga
    pub(crate) fn yielding(mut self) -> Self {
        self.yield_first = true;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MapLoader for FakeLoader {
    type Backend = FakeMap;

    async fn load(&self, options: &MapOptions) -> Result<FakeMap, MapError> {
        self.calls.set(self.calls.get() + 1);
        if self.yield_first {
            tokio::task::yield_now().await;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(FakeMap::new(options.clone())),
        }
    }
}
