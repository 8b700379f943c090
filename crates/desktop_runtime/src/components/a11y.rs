//! DOM focus and menu-keyboard helpers for shell popups.

use wasm_bindgen::JsCast;

const MENU_ITEM_SELECTOR: &str = r#"[role="menuitem"]:not([disabled])"#;

fn menu_items(menu_id: &str) -> Vec<web_sys::HtmlElement> {
    let Some(menu) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(menu_id))
    else {
        return Vec::new();
    };
    let Ok(nodes) = menu.query_selector_all(MENU_ITEM_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

fn active_element_id() -> Option<String> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element())
        .map(|element| element.id())
        .filter(|id| !id.is_empty())
}

/// Index of the item that receives focus after a roving-focus key.
pub(super) fn roving_index(key: &str, current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0);
    match key {
        "ArrowDown" => Some((current + 1) % len),
        "ArrowUp" => Some((current + len - 1) % len),
        "Home" => Some(0),
        "End" => Some(len - 1),
        _ => None,
    }
}

/// Focuses the first enabled item of a menu.
pub(super) fn focus_first_menu_item(menu_id: &str) -> bool {
    menu_items(menu_id)
        .first()
        .map(|item| item.focus().is_ok())
        .unwrap_or(false)
}

/// Moves focus between menu items for arrow, Home and End keys.
pub(super) fn handle_menu_roving_keydown(ev: &web_sys::KeyboardEvent, menu_id: &str) -> bool {
    let items = menu_items(menu_id);
    let active = active_element_id();
    let current = items
        .iter()
        .position(|item| Some(item.id()) == active);
    let Some(next) = roving_index(&ev.key(), current, items.len()) else {
        return false;
    };
    ev.prevent_default();
    ev.stop_propagation();
    let _ = items[next].focus();
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn roving_focus_wraps_at_both_ends() {
        assert_eq!(roving_index("ArrowDown", Some(2), 3), Some(0));
        assert_eq!(roving_index("ArrowUp", Some(0), 3), Some(2));
        assert_eq!(roving_index("ArrowUp", None, 3), Some(2));
        assert_eq!(roving_index("End", None, 3), Some(2));
        assert_eq!(roving_index("Tab", Some(1), 3), None);
        assert_eq!(roving_index("ArrowDown", None, 0), None);
    }
}
