use crate::parsing::csv_parser::{parse_csv, parse_csv_with_separator};

#[test]
fn parses_header_and_rows_in_column_order() {
    let rows = parse_csv("a,b,c\n1,2,3\n4,5,6\n");

    assert_eq!(rows.len(), 2);
    let keys: Vec<&String> = rows[0].keys().collect();
    assert_eq!(keys, ["a", "b", "c"]);
    assert_eq!(rows[0]["a"], "1");
    assert_eq!(rows[1]["c"], "6");
}

#[test]
fn normalizes_line_endings() {
    let rows = parse_csv("a,b\r\n1,2\r3,4\n");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["b"], "2");
    assert_eq!(rows[1]["a"], "3");
}

#[test]
fn drops_empty_lines() {
    let rows = parse_csv("\n\na,b\n\n1,2\n\n\n3,4\n");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["a"], "1");
    assert_eq!(rows[1]["b"], "4");
}

#[test]
fn trims_headers_and_values() {
    let rows = parse_csv(" a , b \n 1 , 2 \n");

    assert_eq!(rows[0]["a"], "1");
    assert_eq!(rows[0]["b"], "2");
}

#[test]
fn short_rows_pad_missing_trailing_fields_with_empty_strings() {
    let rows = parse_csv("a,b,c\n1\n");

    assert_eq!(rows[0]["a"], "1");
    assert_eq!(rows[0]["b"], "");
    assert_eq!(rows[0]["c"], "");
}

#[test]
fn long_rows_ignore_extra_fields() {
    let rows = parse_csv("a,b\n1,2,3,4\n");

    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0]["b"], "2");
}

#[test]
fn header_only_input_yields_no_rows() {
    assert!(parse_csv("a,b,c\n").is_empty());
    assert!(parse_csv("").is_empty());
}

#[test]
fn duplicate_headers_keep_last_value_at_first_position() {
    let rows = parse_csv("a,b,a\n1,2,3\n");

    let keys: Vec<&String> = rows[0].keys().collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(rows[0]["a"], "3");
}

#[test]
fn quoted_fields_are_not_interpreted() {
    // declared limitation: quotes are ordinary characters and the
    // separator always splits
    let rows = parse_csv("a,b\n\"x,y\",2\n");

    assert_eq!(rows[0]["a"], "\"x");
    assert_eq!(rows[0]["b"], "y\"");
}

#[test]
fn alternate_separator() {
    let rows = parse_csv_with_separator("a;b\n1;2\n", ';');

    assert_eq!(rows[0]["a"], "1");
    assert_eq!(rows[0]["b"], "2");
}
