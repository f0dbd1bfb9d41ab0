use super::{hash_map, run_test, ExpectedState};

#[test]
fn test_bit() {
    // BIT leaves the carry flag untouched; OR A clears it first
    run_test(
        // LD B, 0x3C; OR A; CB BIT 0, B
        "063CB7CB40",
        &ExpectedState {
            b: Some(0x3C),
            f: Some(0xA0),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x04; OR A; CB BIT 2, B
        "0604B7CB50",
        &ExpectedState {
            b: Some(0x04),
            f: Some(0x20),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x7F; OR A; CB BIT 7, B
        "067FB7CB78",
        &ExpectedState {
            b: Some(0x7F),
            f: Some(0xA0),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn set_bit() {
    run_test(
        // LD B, 0x00; CB SET 0, B
        "0600CBC0",
        &ExpectedState {
            b: Some(0x01),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x01; CB SET 7, B
        "0601CBF8",
        &ExpectedState {
            b: Some(0x81),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn reset_bit() {
    run_test(
        // LD B, 0xFF; CB RES 0, B
        "06FFCB80",
        &ExpectedState {
            b: Some(0xFE),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x81; CB RES 7, B
        "0681CBB8",
        &ExpectedState {
            b: Some(0x01),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn single_bit_indirect_hl() {
    run_test(
        // LD HL, 0xCDA4; LD (HL), 0x08; CB SET 2, (HL)
        "21A4CD3608CBD6",
        &ExpectedState {
            memory: hash_map! { 0xCDA4: 0x0C },
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD HL, 0xCDA4; LD (HL), 0x0C; CB RES 3, (HL)
        "21A4CD360CCB9E",
        &ExpectedState {
            memory: hash_map! { 0xCDA4: 0x04 },
            ..ExpectedState::empty()
        },
    );

    // LD HL, 0xCDA4; LD (HL), 0x10; OR A; CB BIT 4, (HL)
    run_test(
        "21A4CD3610B7CB66",
        &ExpectedState {
            f: Some(0x20),
            ..ExpectedState::empty()
        },
    );
}
