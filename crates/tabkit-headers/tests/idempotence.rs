use polars::prelude::*;
use proptest::prelude::*;
use tabkit_headers::{HeaderCase, normalize_header, standard_headers_lower, standard_headers_upper};

fn case_strategy() -> impl Strategy<Value = HeaderCase> {
    prop_oneof![Just(HeaderCase::Lower), Just(HeaderCase::Upper)]
}

proptest! {
    #[test]
    fn normalize_is_idempotent(name in "[ \\tA-Za-z0-9_éÉß-]{0,24}", case in case_strategy()) {
        let once = normalize_header(&name, case);
        let twice = normalize_header(&once, case);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_headers_have_no_spaces_or_padding(name in "[ A-Za-z0-9]{0,24}", case in case_strategy()) {
        let normalized = normalize_header(&name, case);
        prop_assert!(!normalized.contains(' '));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }
}

#[test]
fn standardizing_twice_changes_nothing() {
    let df = df!(
        " Customer Name " => ["Ada", "Grace"],
        "Total Spend" => [10i64, 20],
    )
    .unwrap();

    let once = standard_headers_lower(df).unwrap();
    let twice = standard_headers_lower(once.clone()).unwrap();
    assert_eq!(once.get_column_names(), twice.get_column_names());
    assert!(once.equals(&twice));

    let upper_once = standard_headers_upper(once).unwrap();
    let upper_twice = standard_headers_upper(upper_once.clone()).unwrap();
    assert_eq!(upper_once.get_column_names(), upper_twice.get_column_names());
}
