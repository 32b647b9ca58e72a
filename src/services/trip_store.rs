// ============================================================================
// TRIP STORE - Itinerario actual + historial de viajes guardados
// ============================================================================

use chrono::{DateTime, Local, TimeZone};

use crate::config::StorageConfig;
use crate::models::{Itinerary, SavedTrip, TripHistory};
use crate::utils::storage::{KeyValueStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum TripStoreError {
    #[error("No route to save!")]
    NothingToSave,
    #[error("Current route is unreadable: {0}")]
    CorruptItinerary(#[source] serde_json::Error),
    #[error("Could not serialize saved trips: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct TripStore<S: KeyValueStore> {
    storage: S,
    keys: StorageConfig,
}

impl<S: KeyValueStore> TripStore<S> {
    pub fn new(storage: S, keys: StorageConfig) -> Self {
        Self { storage, keys }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Itinerario que dejó el flujo de recomendación (solo lectura)
    pub fn current_itinerary(&self) -> Result<Option<Itinerary>, TripStoreError> {
        match self.storage.get_item(&self.keys.current_itinerary_key)? {
            Some(json) => {
                let itinerary = serde_json::from_str::<Option<Itinerary>>(&json)
                    .map_err(TripStoreError::CorruptItinerary)?;
                Ok(itinerary)
            }
            None => Ok(None),
        }
    }

    /// Historial guardado; ausente o ilegible (no es un array JSON) cuenta como vacío.
    /// Entradas con otra forma se conservan tal cual.
    pub fn history(&self) -> Result<TripHistory, TripStoreError> {
        let Some(json) = self.storage.get_item(&self.keys.saved_trips_key)? else {
            return Ok(TripHistory::default());
        };

        match serde_json::from_str::<Option<TripHistory>>(&json) {
            Ok(history) => Ok(history.unwrap_or_default()),
            Err(e) => {
                log::warn!("⚠️ [STORE] Historial ilegible, se empieza de cero: {}", e);
                Ok(TripHistory::default())
            }
        }
    }

    pub fn save(&self) -> Result<SavedTrip, TripStoreError> {
        self.save_at(&Local::now())
    }

    /// Guarda el itinerario actual al principio del historial
    pub fn save_at<Tz>(&self, now: &DateTime<Tz>) -> Result<SavedTrip, TripStoreError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let spots = match self.current_itinerary()? {
            Some(spots) if !spots.is_empty() => spots,
            _ => {
                log::warn!("⚠️ [STORE] No hay ruta actual para guardar");
                return Err(TripStoreError::NothingToSave);
            }
        };

        let mut history = self.history()?;
        let trip = SavedTrip::create(spots, now, &history);
        history.prepend(&trip).map_err(TripStoreError::Serialize)?;

        let json = serde_json::to_string(&history).map_err(TripStoreError::Serialize)?;
        self.storage.set_item(&self.keys.saved_trips_key, &json)?;

        log::info!(
            "💾 [STORE] Viaje {} guardado ({} paradas, {} en el historial)",
            trip.id,
            trip.spots.len(),
            history.len()
        );
        Ok(trip)
    }
}
