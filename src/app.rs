// ============================================================================
// APP - Contexto explícito: sesión del mapa, renderer, lista y almacén
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::JsValue;

use crate::config::AppConfig;
use crate::maps::{DrawOutcome, MapBackend, MapError, MapLoader, MapOptions, MapRenderer, MapSession};
use crate::models::{SavedTrip, Stop, TripHistory};
use crate::services::{TripStore, TripStoreError};
use crate::utils::storage::KeyValueStore;
use crate::viewmodels::{ResultListView, ResultListViewModel};
use crate::views::render_result_list;

pub struct TripApp<B: MapBackend, S: KeyValueStore> {
    config: AppConfig,
    session: MapSession<B>,
    renderer: MapRenderer<B>,
    result_list: ResultListViewModel,
    store: TripStore<S>,
}

impl<B: MapBackend, S: KeyValueStore> TripApp<B, S> {
    pub fn new(config: AppConfig, storage: S) -> Self {
        Self {
            session: MapSession::new(MapOptions::from(&config.map)),
            renderer: MapRenderer::new(config.route_style.clone()),
            result_list: ResultListViewModel::new(&config.ui),
            store: TripStore::new(storage, config.storage.clone()),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &MapSession<B> {
        &self.session
    }

    pub async fn initialize_map<L>(&self, loader: &L) -> Result<Rc<B>, MapError>
    where
        L: MapLoader<Backend = B>,
    {
        self.session.initialize(loader).await
    }

    /// Igual que `initialize_map`, pero una carga ya en curso no cuenta como fallo.
    /// Devuelve si el mapa quedó listo en esta llamada.
    pub async fn start_map<L>(&self, loader: &L) -> Result<bool, MapError>
    where
        L: MapLoader<Backend = B>,
    {
        match self.session.initialize(loader).await {
            Ok(_) => Ok(true),
            Err(MapError::AlreadyInitializing) => {
                log::info!("⏳ [APP] El mapa ya se está cargando");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn draw_route(&self, stops: Option<&[Stop]>) -> DrawOutcome {
        self.renderer.draw_route(&self.session, stops)
    }

    pub fn result_view(&self, stops: Option<&[Stop]>) -> ResultListView {
        self.result_list.prepare(stops)
    }

    pub fn render_results(&self, stops: Option<&[Stop]>) -> Result<(), JsValue> {
        render_result_list(&self.config.ui.result_container_id, &self.result_list, stops)
    }

    /// Mapa + lista con las mismas paradas
    pub fn show_itinerary(&self, stops: Option<&[Stop]>) -> Result<DrawOutcome, JsValue> {
        let outcome = self.draw_route(stops);
        self.render_results(stops)?;
        Ok(outcome)
    }

    pub fn save_current_trip(&self) -> Result<SavedTrip, TripStoreError> {
        self.store.save()
    }

    pub fn saved_trips(&self) -> Result<TripHistory, TripStoreError> {
        self.store.history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::fake::{FakeLoader, FakeMap};
    use crate::maps::SkipReason;
    use crate::utils::storage::MemoryStorage;

    fn app(storage: MemoryStorage) -> TripApp<FakeMap, MemoryStorage> {
        TripApp::new(AppConfig::default(), storage)
    }

    fn itinerary() -> Vec<Stop> {
        vec![
            Stop::new("Gyeongbokgung Palace", "Royal palace", 37.5796, 126.977),
            Stop::new("Bukchon Hanok Village", "Hanok alleys", 37.5826, 126.985),
            Stop::new("Insadong", "Tea houses", 37.5743, 126.9895),
        ]
    }

    #[tokio::test]
    async fn rendering_waits_for_the_map() {
        let app = app(MemoryStorage::default());
        let stops = itinerary();

        assert_eq!(app.draw_route(Some(stops.as_slice())), DrawOutcome::Skipped(SkipReason::NotReady));

        let map = app.initialize_map(&FakeLoader::default()).await.unwrap();
        let outcome = app.draw_route(Some(stops.as_slice()));

        assert_eq!(outcome, DrawOutcome::Drawn { generation: 1, markers: 3, segments: 2 });
        assert_eq!(map.attached_marker_labels(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn failed_map_load_keeps_app_usable() {
        let app = app(MemoryStorage::default());
        let Err(err) = app
            .initialize_map(&FakeLoader::failing(MapError::SdkLoad("maps".into())))
            .await
        else {
            panic!("expected the map load to fail");
        };

        assert_eq!(err, MapError::SdkLoad("maps".into()));
        assert!(!app.session().is_ready());
        assert!(matches!(app.result_view(None), ResultListView::Placeholder { .. }));
    }

    #[tokio::test]
    async fn second_start_while_loading_is_not_a_failure() {
        let app = app(MemoryStorage::default());
        let loader = FakeLoader::default().yielding();

        let (first, second) = tokio::join!(app.start_map(&loader), app.start_map(&loader));

        assert_eq!(first, Ok(true));
        assert_eq!(second, Ok(false));
        assert_eq!(loader.calls(), 1);
        assert!(app.session().is_ready());
        assert_eq!(app.start_map(&loader).await, Ok(true));
    }

    #[tokio::test]
    async fn start_map_still_reports_real_failures() {
        let app = app(MemoryStorage::default());
        let result = app
            .start_map(&FakeLoader::failing(MapError::ContainerNotFound("map-container".into())))
            .await;

        assert_eq!(result, Err(MapError::ContainerNotFound("map-container".into())));
    }

    #[test]
    fn saves_current_itinerary_into_history() {
        let current = serde_json::to_string(&itinerary()).unwrap();
        let app = app(MemoryStorage::default().with_item("currentSpots", &current));

        let saved = app.save_current_trip().unwrap();
        let history = app.saved_trips().unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(saved.clone()));
        assert_eq!(saved.spots.stops(), itinerary().as_slice());
    }
}
