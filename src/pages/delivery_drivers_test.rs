use super::normalize_gabon_phone;

#[test]
fn local_number_gets_country_code() {
    assert_eq!(normalize_gabon_phone("074123456"), "241074123456");
}

#[test]
fn plus_prefix_and_spaces_are_stripped() {
    assert_eq!(normalize_gabon_phone("+241 074 123 456"), "241074123456");
}

#[test]
fn double_zero_prefix_is_stripped() {
    assert_eq!(normalize_gabon_phone("00241074123456"), "241074123456");
}

#[test]
fn already_normalized_number_is_unchanged() {
    assert_eq!(normalize_gabon_phone("241074123456"), "241074123456");
}
