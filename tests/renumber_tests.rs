mod common;
use common::activity_row;
use rplanner::core::renumber::renumber;
use rplanner::models::hier_id::HierarchicalId;
use rplanner::models::row::Row;

fn ids(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .map(|r| {
            let micro = r.text("Sub ID");
            if micro.is_empty() { r.text("ID") } else { micro }
        })
        .collect()
}

#[test]
fn test_gap_in_groups_is_closed() {
    let rows = vec![
        activity_row("1", "1", "", "Payroll"),
        activity_row("2", "1", "1", "Collect timesheets"),
        activity_row("3", "3", "", "Audit"),
    ];
    let out = renumber(rows);
    assert_eq!(ids(&out), vec!["1", "1.1", "2"]);
}

#[test]
fn test_headers_sort_before_children_and_children_are_dense() {
    let rows = vec![
        activity_row("1", "2", "2.7", "b"),
        activity_row("2", "2", "2.3", "a"),
        activity_row("3", "2", "", "group two"),
        activity_row("4", "5", "5.1", "c"),
    ];
    let out = renumber(rows);

    assert_eq!(ids(&out), vec!["1", "1.1", "1.2", "2.1"]);
    let names: Vec<String> = out.iter().map(|r| r.text("Activity")).collect();
    assert_eq!(names, vec!["group two", "a", "b", "c"]);
}

#[test]
fn test_unparseable_rows_go_last_untouched() {
    let rows = vec![
        activity_row("1", "x", "", "bad macro"),
        activity_row("2", "4", "", "ok"),
        activity_row("3", "2", "2.b", "bad micro"),
        activity_row("4", "0", "", "zero"),
    ];
    let out = renumber(rows);

    let names: Vec<String> = out.iter().map(|r| r.text("Activity")).collect();
    assert_eq!(names, vec!["ok", "bad macro", "bad micro", "zero"]);
    assert_eq!(out[0].text("ID"), "1");
    assert_eq!(out[1].text("ID"), "x");
    assert_eq!(out[2].text("Sub ID"), "2.b");
    assert_eq!(out[3].text("ID"), "0");
}

#[test]
fn test_output_is_dense() {
    let rows = vec![
        activity_row("1", "7", "", "g7"),
        activity_row("2", "7", "7.4", "g7c"),
        activity_row("3", "3", "3.9", "g3c"),
        activity_row("4", "12", "", "g12"),
        activity_row("5", "3", "", "g3"),
        activity_row("6", "12", "12.2", "g12c"),
        activity_row("7", "12", "12.2", "g12c-dup"),
    ];
    let out = renumber(rows);

    let parsed: Vec<HierarchicalId> = out
        .iter()
        .map(|r| HierarchicalId::from_columns(&r.text("ID"), &r.text("Sub ID")).expect("parseable"))
        .collect();

    let mut macros: Vec<u32> = parsed.iter().map(|id| id.macro_id).collect();
    macros.dedup();
    assert_eq!(macros, vec![1, 2, 3]);

    for m in 1..=3 {
        let micros: Vec<u32> = parsed
            .iter()
            .filter(|id| id.macro_id == m)
            .filter_map(|id| id.micro_id)
            .collect();
        let expected: Vec<u32> = (1..=micros.len() as u32).collect();
        assert_eq!(micros, expected, "group {m}");
    }
}

#[test]
fn test_renumber_is_a_fixed_point() {
    let rows = vec![
        activity_row("1", "4", "4.4", "a"),
        activity_row("2", "2", "", "b"),
        activity_row("3", "nope", "", "c"),
        activity_row("4", "4", "", "d"),
        activity_row("5", "2", "2.1", "e"),
    ];
    let once = renumber(rows);
    let twice = renumber(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_append_placeholders_land_at_the_end() {
    let group = HierarchicalId::append_group();
    let child = HierarchicalId::append_child(1);
    let rows = vec![
        activity_row("1", "1", "", "first"),
        activity_row("2", "1", "1.1", "first child"),
        activity_row("3", &group.macro_text(), &group.micro_text(), "new group"),
        activity_row("4", &child.macro_text(), &child.micro_text(), "new child"),
        activity_row("5", "2", "", "second"),
    ];
    let out = renumber(rows);

    let names: Vec<String> = out.iter().map(|r| r.text("Activity")).collect();
    assert_eq!(names, vec!["first", "first child", "new child", "second", "new group"]);
    assert_eq!(ids(&out), vec!["1", "1.1", "1.2", "2", "3"]);
}

#[test]
fn test_user_id_parsing() {
    assert_eq!("3".parse::<HierarchicalId>().expect("id"), HierarchicalId::group(3));
    assert_eq!("3.2".parse::<HierarchicalId>().expect("id"), HierarchicalId::child(3, 2));
    assert!("3.x".parse::<HierarchicalId>().is_err());
    assert!("0".parse::<HierarchicalId>().is_err());
    assert_eq!(HierarchicalId::child(3, 2).to_string(), "3.2");
}
