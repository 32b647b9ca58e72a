// ============================================================================
// RESULT LIST VIEWMODEL - Datos de las tarjetas de paradas
// ============================================================================
// SOLO preparación de datos - Sin DOM
// ============================================================================

use serde::Serialize;

use crate::config::UiConfig;
use crate::models::Stop;

/// Tarjeta de una parada en la lista
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopCard {
    pub position: usize,
    pub name: String,
    pub description: String,
    pub tag: String,
    /// Línea hacia la siguiente tarjeta (no en la última)
    pub show_connector: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultListView {
    Placeholder { message: String },
    Cards { cards: Vec<StopCard> },
}

pub struct ResultListViewModel {
    default_tag: String,
    empty_message: String,
}

impl ResultListViewModel {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            default_tag: ui.default_media_label.clone(),
            empty_message: ui.empty_results_message.clone(),
        }
    }

    pub fn prepare(&self, stops: Option<&[Stop]>) -> ResultListView {
        let stops = match stops {
            Some(stops) if !stops.is_empty() => stops,
            _ => {
                return ResultListView::Placeholder {
                    message: self.empty_message.clone(),
                }
            }
        };

        let last = stops.len() - 1;
        let cards = stops
            .iter()
            .enumerate()
            .map(|(index, stop)| StopCard {
                position: index + 1,
                name: stop.name.clone(),
                description: stop.description.clone(),
                tag: stop.media_title().unwrap_or(self.default_tag.as_str()).to_string(),
                show_connector: index != last,
            })
            .collect();

        ResultListView::Cards { cards }
    }
}

impl Default for ResultListViewModel {
    fn default() -> Self {
        Self::new(&UiConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(view: ResultListView) -> Vec<StopCard> {
        match view {
            ResultListView::Cards { cards } => cards,
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[test]
    fn empty_or_missing_stops_show_placeholder() {
        let vm = ResultListViewModel::default();
        let placeholder = ResultListView::Placeholder {
            message: "No spots found.".to_string(),
        };

        assert_eq!(vm.prepare(None), placeholder);
        assert_eq!(vm.prepare(Some(&[][..])), placeholder);
    }

    #[test]
    fn single_stop_has_no_connector() {
        let stops = vec![Stop::new("Bukchon Hanok Village", "Hanok alleys", 37.5826, 126.985)];

        let cards = cards(ResultListViewModel::default().prepare(Some(stops.as_slice())));

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].position, 1);
        assert!(!cards[0].show_connector);
        assert_eq!(cards[0].tag, "K-Place");
    }

    #[test]
    fn connector_only_between_cards() {
        let stops = vec![
            Stop::new("A", "first", 37.0, 127.0).with_media_title("Goblin"),
            Stop::new("B", "second", 37.1, 127.1),
        ];

        let cards = cards(ResultListViewModel::default().prepare(Some(stops.as_slice())));

        assert_eq!(
            cards,
            vec![
                StopCard {
                    position: 1,
                    name: "A".into(),
                    description: "first".into(),
                    tag: "Goblin".into(),
                    show_connector: true,
                },
                StopCard {
                    position: 2,
                    name: "B".into(),
                    description: "second".into(),
                    tag: "K-Place".into(),
                    show_connector: false,
                },
            ]
        );
    }

    #[test]
    fn prepare_is_repeatable() {
        let vm = ResultListViewModel::default();
        let stops = vec![Stop::new("A", "", 37.0, 127.0), Stop::new("B", "", 37.1, 127.1)];

        assert_eq!(vm.prepare(Some(stops.as_slice())), vm.prepare(Some(stops.as_slice())));
    }
}
