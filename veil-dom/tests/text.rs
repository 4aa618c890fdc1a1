use veil_dom::{display_width, render_lines, truncate_to_width, Element};

#[test]
fn test_truncate_short_string_untouched() {
    assert_eq!(truncate_to_width("hello", 10), "hello");
}

#[test]
fn test_truncate_adds_ellipsis() {
    assert_eq!(truncate_to_width("hello world", 6), "hello…");
    assert_eq!(display_width(&truncate_to_width("hello world", 6)), 6);
}

#[test]
fn test_truncate_zero_width() {
    assert_eq!(truncate_to_width("hello", 0), "");
}

#[test]
fn test_truncate_wide_chars() {
    // Each CJK char is two columns wide.
    let out = truncate_to_width("당근마켓", 5);
    assert!(display_width(&out) <= 5);
    assert!(out.ends_with('…'));
}

#[test]
fn test_render_lines_column_and_row() {
    let root = Element::col()
        .child(Element::text("Title"))
        .child(
            Element::row()
                .child(Element::button("Yes").id("yes"))
                .child(Element::button("No").id("no")),
        );
    assert_eq!(render_lines(&root, 40, None), vec!["Title", "Yes No"]);
}

#[test]
fn test_render_lines_marks_focus() {
    let root = Element::col()
        .child(Element::button("Yes").id("yes"))
        .child(Element::button("No").id("no"));
    assert_eq!(render_lines(&root, 40, Some("no")), vec!["Yes", "› No"]);
}

#[test]
fn test_render_lines_respects_order() {
    let root = Element::col()
        .child(Element::text("second").order(2))
        .child(Element::text("first").order(1));
    assert_eq!(render_lines(&root, 40, None), vec!["first", "second"]);
}
