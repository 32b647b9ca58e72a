// ============================================================================
// RESULT LIST VIEW - Tarjetas de paradas en #result-container
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id, ElementBuilder};
use crate::models::Stop;
use crate::viewmodels::{ResultListView, ResultListViewModel, StopCard};

/// Renderiza la lista en el contenedor. Sin contenedor no hace nada.
pub fn render_result_list(
    container_id: &str,
    view_model: &ResultListViewModel,
    stops: Option<&[Stop]>,
) -> Result<(), JsValue> {
    let Some(container) = get_element_by_id(container_id) else {
        log::debug!("📋 [LIST] #{} no existe, nada que renderizar", container_id);
        return Ok(());
    };

    clear_children(&container);

    match view_model.prepare(stops) {
        ResultListView::Placeholder { message } => {
            let placeholder = ElementBuilder::new("p")?
                .class("text-center text-gray-500 py-10")
                .text(&message)
                .build();
            append_child(&container, &placeholder)?;
        }
        ResultListView::Cards { cards } => {
            for card in &cards {
                append_child(&container, &render_stop_card(card)?)?;
            }
            log::info!("📋 [LIST] {} tarjetas renderizadas", cards.len());
        }
    }

    Ok(())
}

fn render_stop_card(card: &StopCard) -> Result<Element, JsValue> {
    let badge = ElementBuilder::new("div")?
        .class("w-8 h-8 bg-indigo-600 rounded-xl flex items-center justify-center text-white font-bold text-xs")
        .text(&card.position.to_string())
        .build();

    let connector = if card.show_connector {
        Some(ElementBuilder::new("div")?.class("line-draw h-full").build())
    } else {
        None
    };

    let timeline = ElementBuilder::new("div")?
        .class("flex flex-col items-center")
        .child(badge)?
        .child_if(connector)?
        .build();

    let body = ElementBuilder::new("div")?
        .class("bg-white p-4 rounded-2xl flex-1 mb-4 border border-gray-100 shadow-sm")
        .child(
            ElementBuilder::new("h4")?
                .class("font-bold text-sm text-indigo-900")
                .text(&card.name)
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .class("text-[10px] text-gray-500 mt-1")
                .text(&card.description)
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("mt-2 text-[10px] font-bold text-indigo-400 bg-indigo-50 inline-block px-2 py-1 rounded-md")
                .text(&card.tag)
                .build(),
        )?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("flex gap-4")
        .attr("data-position", &card.position.to_string())?
        .child(timeline)?
        .child(body)?
        .build())
}
