use super::*;

#[test]
fn delete_and_escape_are_consumed_outside_text_fields() {
    assert!(should_prevent_default_key(&Key::new("Delete"), false));
    assert!(should_prevent_default_key(&Key::new("Backspace"), false));
    assert!(should_prevent_default_key(&Key::new("Escape"), false));
    assert!(!should_prevent_default_key(&Key::new("a"), false));
}

#[test]
fn text_fields_keep_their_keys() {
    assert!(!should_prevent_default_key(&Key::new("Backspace"), true));
    assert!(!should_prevent_default_key(&Key::new("Escape"), true));
}

#[test]
fn grid_size_parsing() {
    assert_eq!(parse_grid_size(" 25 "), Some(25.0));
    assert_eq!(parse_grid_size("12.5"), Some(12.5));
    assert_eq!(parse_grid_size(""), None);
    assert_eq!(parse_grid_size("0.5"), None);
    assert_eq!(parse_grid_size("NaN"), None);
    assert_eq!(parse_grid_size("ten"), None);
}

#[test]
fn modifiers_and_zoom_label() {
    let mods = map_modifiers(true, false, true, false);
    assert!(mods.shift && mods.alt && !mods.ctrl && !mods.meta);
    assert_eq!(zoom_label(125), "125%");
}
