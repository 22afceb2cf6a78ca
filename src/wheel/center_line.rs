pub fn center_line_visible(drag_active: bool, hide_for_last_item: bool, is_last: bool) -> bool {
    drag_active || !hide_for_last_item || !is_last
}
