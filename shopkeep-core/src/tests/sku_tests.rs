use super::*;

const SMALL: u64 = 1_000;

#[test]
fn nine_digit_name_is_valid_sku() {
    let class = classify("123456789.jpg", SMALL);
    assert_eq!(class, ImageClass::ValidSku(Sku::parse("123456789").unwrap()));
}

#[test]
fn all_allowed_extensions_pass() {
    for ext in ["png", "jpg", "jpeg", "gif", "PNG", "JPeG"] {
        let name = format!("123456789.{ext}");
        assert!(
            matches!(classify(&name, SMALL), ImageClass::ValidSku(_)),
            "{name} should be a valid SKU"
        );
    }
}

#[test]
fn variant_suffix_is_duplicate() {
    assert_eq!(classify("123456789-1.jpg", SMALL), ImageClass::DuplicateVariant);
    assert_eq!(classify("123456789-12.png", SMALL), ImageClass::DuplicateVariant);
}

#[test]
fn short_base_name_is_invalid_name() {
    assert_eq!(classify("12345.jpg", SMALL), ImageClass::InvalidName);
}

#[test]
fn long_or_non_numeric_base_is_invalid_name() {
    assert_eq!(classify("1234567890.jpg", SMALL), ImageClass::InvalidName);
    assert_eq!(classify("12345678a.jpg", SMALL), ImageClass::InvalidName);
    assert_eq!(classify("new-photo-3.jpg", SMALL), ImageClass::InvalidName);
}

#[test]
fn three_digit_suffix_is_invalid_name() {
    assert_eq!(classify("123456789-123.jpg", SMALL), ImageClass::InvalidName);
}

#[test]
fn non_numeric_or_empty_suffix_is_invalid_name() {
    assert_eq!(classify("123456789-a.jpg", SMALL), ImageClass::InvalidName);
    assert_eq!(classify("123456789-.jpg", SMALL), ImageClass::InvalidName);
}

#[test]
fn disallowed_extension_is_invalid_type() {
    assert_eq!(classify("123456789.bmp", SMALL), ImageClass::InvalidType);
}

#[test]
fn missing_extension_is_invalid_type() {
    assert_eq!(classify("123456789", SMALL), ImageClass::InvalidType);
}

#[test]
fn extension_is_token_after_first_dot() {
    // "tar" is the extension of "a.tar.gz" under first-dot splitting.
    assert_eq!(classify("123456789.tar.gz", SMALL), ImageClass::InvalidType);
    // A stray second dot after a good extension still classifies by the
    // first token.
    assert!(matches!(
        classify("123456789.jpg.bak", SMALL),
        ImageClass::ValidSku(_)
    ));
}

#[test]
fn oversized_file_is_invalid_size() {
    assert_eq!(classify("123456789.jpg", 16_000_000), ImageClass::InvalidSize);
}

#[test]
fn boundary_size_is_still_valid() {
    assert!(matches!(
        classify("123456789.jpg", MAX_IMAGE_BYTES),
        ImageClass::ValidSku(_)
    ));
    assert_eq!(
        classify("123456789.jpg", MAX_IMAGE_BYTES + 1),
        ImageClass::InvalidSize
    );
}

#[test]
fn type_check_wins_over_size_and_name() {
    // Breaks every rule at once; the type check runs first.
    assert_eq!(classify("bad-name!.bmp", 16_000_000), ImageClass::InvalidType);
}

#[test]
fn size_check_wins_over_name() {
    assert_eq!(classify("12345.jpg", 16_000_000), ImageClass::InvalidSize);
}

#[test]
fn housekeeping_files_are_ignored() {
    assert!(is_ignored("desktop.ini"));
    assert!(!is_ignored("123456789.jpg"));
}

#[test]
fn classification_is_total() {
    // A grab bag of odd names; each must land in exactly one class
    // without panicking.
    for name in [
        "",
        ".",
        "..",
        ".jpg",
        "-.jpg",
        "a-b-c.jpg",
        "123456789-1-2.jpg",
        "123456789.",
        "ünïcode.jpg",
    ] {
        let _ = classify(name, SMALL);
    }
}

#[test]
fn sku_parse_rules() {
    assert!(Sku::parse("123456789").is_some());
    assert!(Sku::parse("12345678").is_none());
    assert!(Sku::parse("1234567890").is_none());
    assert!(Sku::parse("12345678a").is_none());
    assert!(Sku::parse("").is_none());
    // Nine characters of non-ASCII digits must not pass the length check.
    assert!(Sku::parse("１２３４５６７８９").is_none());
}

#[test]
fn sku_displays_as_its_digits() {
    let sku = Sku::parse("000012345").unwrap();
    assert_eq!(sku.to_string(), "000012345");
    assert_eq!(sku.as_str(), "000012345");
}
