use super::*;

#[test]
fn test_columns_are_aligned() {
    let styling = StyleManager::plain();
    let table = TableDisplay::new(&styling)
        .header(&["#", "Repository", "Stars"])
        .row(&["1", "react", "220000"])
        .row(&["2", "vue", "9"]);

    assert_eq!(
        table.render(),
        "# | Repository | Stars\n\
         --+------------+-------\n\
         1 | react      | 220000\n\
         2 | vue        | 9"
    );
}

#[test]
fn test_empty_table_renders_nothing() {
    let styling = StyleManager::plain();

    assert_eq!(TableDisplay::new(&styling).render(), "");
}

#[test]
fn test_short_rows_are_padded() {
    let styling = StyleManager::plain();
    let table = TableDisplay::new(&styling)
        .row(&["a", "b"])
        .row(&["ccc"]);

    assert_eq!(table.render(), "a   | b\nccc");
}

#[test]
fn test_colored_header_keeps_alignment() {
    let styling = StyleManager::new(true);
    let table = TableDisplay::new(&styling)
        .header(&["Name"])
        .row(&["longer"]);

    let rendered = table.render();
    let header = rendered.lines().next().unwrap();
    assert!(header.contains("\u{1b}["));
    assert_eq!(measure_text_width(header), "Name".len());
    assert_eq!(rendered.lines().nth(1).unwrap(), "------");
}
