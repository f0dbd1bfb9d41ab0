use super::{hash_map, run_test, ExpectedState};

#[test]
fn rotate_accumulator() {
    // The accumulator-implicit forms always clear Z
    run_test(
        // LD A, 0x85; RLCA
        "3E8507",
        &ExpectedState {
            a: Some(0x0B),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD A, 0x01; RRCA
        "3E010F",
        &ExpectedState {
            a: Some(0x80),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD A, 0x80; OR A; RLA
        "3E80B717",
        &ExpectedState {
            a: Some(0x00),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD A, 0x01; OR A; RRA
        "3E01B71F",
        &ExpectedState {
            a: Some(0x00),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );

    // RLA shifts the old carry into bit 0
    run_test(
        // LD A, 0x01; SCF; RLA
        "3E013717",
        &ExpectedState {
            a: Some(0x03),
            f: Some(0x00),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn rotate_register() {
    run_test(
        // LD B, 0x85; RLC B
        "0685CB00",
        &ExpectedState {
            b: Some(0x0B),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );

    // The register forms compute Z
    run_test(
        // LD B, 0x00; RLC B
        "0600CB00",
        &ExpectedState {
            b: Some(0x00),
            f: Some(0x80),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x01; RRC B
        "0601CB08",
        &ExpectedState {
            b: Some(0x80),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x80; OR A; RL B
        "0680B7CB10",
        &ExpectedState {
            b: Some(0x00),
            f: Some(0x90),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x01; OR A; RR B
        "0601B7CB18",
        &ExpectedState {
            b: Some(0x00),
            f: Some(0x90),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn shift_left_arithmetic() {
    run_test(
        // LD B, 0xC0; CB SLA B
        "06C0CB20",
        &ExpectedState {
            b: Some(0x80),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn shift_right_arithmetic() {
    // SRA keeps the sign bit
    run_test(
        // LD B, 0x81; CB SRA B
        "0681CB28",
        &ExpectedState {
            b: Some(0xC0),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn shift_right_logical() {
    run_test(
        // LD B, 0x81; CB SRL B
        "0681CB38",
        &ExpectedState {
            b: Some(0x40),
            f: Some(0x10),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x01; CB SRL B
        "0601CB38",
        &ExpectedState {
            b: Some(0x00),
            f: Some(0x90),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn swap() {
    run_test(
        // LD B, 0xAB; CB SWAP B
        "06ABCB30",
        &ExpectedState {
            b: Some(0xBA),
            f: Some(0x00),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD B, 0x00; CB SWAP B
        "0600CB30",
        &ExpectedState {
            b: Some(0x00),
            f: Some(0x80),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn shift_indirect_hl() {
    run_test(
        // LD HL, 0xCDA4; LD (HL), 0x3C; CB SLA (HL)
        "21A4CD363CCB26",
        &ExpectedState {
            f: Some(0x00),
            memory: hash_map! { 0xCDA4: 0x78 },
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD HL, 0xCDA4; LD (HL), 0xF0; CB SWAP (HL)
        "21A4CD36F0CB36",
        &ExpectedState {
            f: Some(0x00),
            memory: hash_map! { 0xCDA4: 0x0F },
            ..ExpectedState::empty()
        },
    );
}
