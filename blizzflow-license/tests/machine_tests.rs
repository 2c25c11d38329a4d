use blizzflow_license::{HardwareIdentity, MachineIdentity};

// Hardware queries are environment-dependent (a bare container may expose
// no disk serial at all), so these tests only pin down the contract when a
// fingerprint is obtainable.

#[test]
fn hardware_fingerprint_is_sha256_hex() {
    if let Ok(fp) = HardwareIdentity.fingerprint() {
        assert_eq!(fp.len(), 64);
        assert!(
            fp.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')),
            "fingerprint is not lowercase hex: {fp}"
        );
    }
}

#[test]
fn hardware_fingerprint_is_stable_across_calls() {
    let first = HardwareIdentity.fingerprint();
    let second = HardwareIdentity.fingerprint();
    match (first, second) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        // Both calls should at least agree on availability.
        (Err(_), Err(_)) => {}
        (a, b) => panic!("inconsistent availability: {a:?} vs {b:?}"),
    }
}

#[test]
fn hardware_identity_is_object_safe() {
    let identity: &dyn MachineIdentity = &HardwareIdentity;
    let _ = identity.fingerprint();
}
