use crate::cpu::InterruptType;
use crate::memory::AddressSpace;
use sdl2::keyboard::Keycode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoypadButton {
    A,
    B,
    Select,
    Start,
    Right,
    Left,
    Up,
    Down,
}

impl JoypadButton {
    /// The button's bit in the latched joypad matrix byte. Bits 0-3 are the action buttons,
    /// bits 4-7 the directions.
    fn matrix_bit(self) -> u8 {
        match self {
            Self::A => 1 << 0,
            Self::B => 1 << 1,
            Self::Select => 1 << 2,
            Self::Start => 1 << 3,
            Self::Right => 1 << 4,
            Self::Left => 1 << 5,
            Self::Up => 1 << 6,
            Self::Down => 1 << 7,
        }
    }
}

/// The fixed key bindings: A/S for A/B, Space/Return for Start/Select, arrow keys for the D-pad.
pub fn button_for_keycode(keycode: Keycode) -> Option<JoypadButton> {
    match keycode {
        Keycode::A => Some(JoypadButton::A),
        Keycode::S => Some(JoypadButton::B),
        Keycode::Return => Some(JoypadButton::Select),
        Keycode::Space => Some(JoypadButton::Start),
        Keycode::Right => Some(JoypadButton::Right),
        Keycode::Left => Some(JoypadButton::Left),
        Keycode::Up => Some(JoypadButton::Up),
        Keycode::Down => Some(JoypadButton::Down),
        _ => None,
    }
}

/// Press or release a button in the latched joypad matrix. The matrix uses the inverted
/// convention: a zero bit means the button is held.
pub fn set_button(address_space: &mut AddressSpace, button: JoypadButton, pressed: bool) {
    let mut joypad_state = address_space.joypad_state();

    if pressed {
        joypad_state &= !button.matrix_bit();
    } else {
        joypad_state |= button.matrix_bit();
    }

    address_space.set_joypad_state(joypad_state);
    log::debug!("joypad {button:?} pressed={pressed}, matrix now {joypad_state:02X}");
}

/// Request a joypad interrupt.
pub fn flag_interrupt(address_space: &mut AddressSpace) {
    address_space
        .get_io_registers_mut()
        .interrupt_flags()
        .set(InterruptType::Joypad);
}
