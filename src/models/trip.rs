use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::stop::Itinerary;

/// Formato de fecha visible: "Jan 1, 2024"
pub const TRIP_DATE_FORMAT: &str = "%b %-d, %Y";

/// Itinerario guardado en el historial (inmutable una vez creado)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrip {
    pub id: i64,
    pub date: String,
    pub spots: Itinerary,
}

impl SavedTrip {
    /// El id es el timestamp en ms, forzado a ser mayor que cualquier id previo
    pub fn create<Tz>(spots: Itinerary, now: &DateTime<Tz>, history: &TripHistory) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let timestamp = now.timestamp_millis();
        let id = match history.max_id() {
            Some(max_id) if timestamp <= max_id => max_id + 1,
            _ => timestamp,
        };

        Self {
            id,
            date: now.format(TRIP_DATE_FORMAT).to_string(),
            spots,
        }
    }
}

/// Historial de viajes, el más reciente primero.
/// Las entradas se conservan como JSON crudo: lo ya guardado se reescribe sin tocar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripHistory(Vec<Value>);

impl TripHistory {
    pub fn entries(&self) -> &[Value] {
        &self.0
    }

    /// Entradas legibles como `SavedTrip`; las demás se omiten
    pub fn trips(&self) -> Vec<SavedTrip> {
        self.0
            .iter()
            .filter_map(|entry| SavedTrip::deserialize(entry).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest(&self) -> Option<SavedTrip> {
        self.0.first().and_then(|entry| SavedTrip::deserialize(entry).ok())
    }

    pub fn max_id(&self) -> Option<i64> {
        self.0
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_i64))
            .max()
    }

    /// Inserta al principio; nunca deduplica
    pub fn prepend(&mut self, trip: &SavedTrip) -> Result<(), serde_json::Error> {
        self.0.insert(0, serde_json::to_value(trip)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;
    use chrono::Utc;

    fn spots() -> Itinerary {
        Itinerary::new(vec![Stop::new("A", "first", 37.5, 127.0)])
    }

    #[test]
    fn date_uses_short_month_day_and_year() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
        let trip = SavedTrip::create(spots(), &now, &TripHistory::default());

        assert_eq!(trip.date, "Jan 1, 2024");
        assert_eq!(trip.id, now.timestamp_millis());
    }

    #[test]
    fn id_is_bumped_past_existing_ids() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let mut history = TripHistory::default();
        let first = SavedTrip::create(spots(), &now, &history);
        history.prepend(&first).unwrap();

        let second = SavedTrip::create(spots(), &now, &history);

        assert_eq!(second.id, now.timestamp_millis() + 1);
        assert_eq!(second.date, "Mar 15, 2024");
    }

    #[test]
    fn prepend_keeps_newest_first_without_dedup() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut history = TripHistory::default();
        for _ in 0..3 {
            let trip = SavedTrip::create(spots(), &now, &history);
            history.prepend(&trip).unwrap();
        }

        let ids: Vec<i64> = history.trips().iter().map(|t| t.id).collect();
        assert_eq!(history.len(), 3);
        assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(history.latest().map(|t| t.id), history.max_id());
    }

    #[test]
    fn history_reads_the_stored_json_shape() {
        let json = r#"[{"id":1,"date":"Jan 1, 2024","spots":[{"name":"A","description":"","lat":37.5,"lng":127.0}]}]"#;
        let history: TripHistory = serde_json::from_str(json).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.trips()[0].spots.stops()[0].name, "A");
    }

    #[test]
    fn unreadable_entries_still_count_for_ids_and_length() {
        let json = r#"[{"id":7,"date":"Jan 1, 2024","spots":"???"},{"id":3,"date":"Jan 1, 2024","spots":[]}]"#;
        let history: TripHistory = serde_json::from_str(json).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.max_id(), Some(7));
        assert_eq!(history.trips().len(), 1);
        assert_eq!(history.latest(), None);
        assert_eq!(
            serde_json::to_value(&history).unwrap(),
            serde_json::from_str::<Value>(json).unwrap()
        );
    }
}
