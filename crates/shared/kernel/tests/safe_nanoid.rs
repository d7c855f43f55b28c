use campus_kernel::SAFE_ALPHABET;
use campus_kernel::safe_nanoid;
use campus_kernel::security::resource::ResourceGuard;

#[test]
fn generates_expected_length_and_charset() {
    let id = safe_nanoid!();
    assert_eq!(id.len(), 12);

    for ch in id.chars() {
        assert!(SAFE_ALPHABET.contains(&ch), "unexpected character in nanoid: {ch}");
    }
}

#[test]
fn custom_length() {
    assert_eq!(safe_nanoid!(20).len(), 20);
}

#[test]
fn generated_ids_pass_the_guard() {
    let id = safe_nanoid!();
    assert_eq!(ResourceGuard::verify(&id, "event").unwrap(), id);
}
