pub(crate) mod instructions;
mod registers;


pub use registers::CpuRegisters;

use crate::memory::ioregisters::IoRegister;
use crate::memory::AddressSpace;

/// Machine cycles charged for servicing an interrupt.
pub const ISR_M_CYCLES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptType {
    VBlank,
    LcdStatus,
    Timer,
    Serial,
    Joypad,
}

impl InterruptType {
    /// All interrupt sources in dispatch priority order (lowest IF bit first).
    pub const PRIORITY_ORDER: [Self; 5] = [
        Self::VBlank,
        Self::LcdStatus,
        Self::Timer,
        Self::Serial,
        Self::Joypad,
    ];

    pub fn flag_bit(self) -> u8 {
        match self {
            Self::VBlank => 1 << 0,
            Self::LcdStatus => 1 << 1,
            Self::Timer => 1 << 2,
            Self::Serial => 1 << 3,
            Self::Joypad => 1 << 4,
        }
    }

    pub fn handler_address(self) -> u16 {
        match self {
            Self::VBlank => 0x0040,
            Self::LcdStatus => 0x0048,
            Self::Timer => 0x0050,
            Self::Serial => 0x0058,
            Self::Joypad => 0x0060,
        }
    }
}

fn pending_interrupts(address_space: &AddressSpace) -> u8 {
    address_space.get_io_registers().read_register(IoRegister::IF)
        & address_space.get_ie_register()
        & 0x1F
}

/// Whether the CPU should service an interrupt before executing the next instruction.
pub fn interrupt_triggered(cpu_registers: &CpuRegisters, address_space: &AddressSpace) -> bool {
    cpu_registers.ime && pending_interrupts(address_space) != 0
}

/// Whether an enabled interrupt is requested, regardless of the IME flag. A pending interrupt
/// wakes a halted CPU even when interrupts are disabled.
pub fn interrupt_triggered_no_ime_check(address_space: &AddressSpace) -> bool {
    pending_interrupts(address_space) != 0
}

/// Service the highest-priority pending interrupt: push PC, clear IME and the serviced IF bit,
/// and jump to the handler address.
pub fn execute_interrupt_service_routine(
    cpu_registers: &mut CpuRegisters,
    address_space: &mut AddressSpace,
) {
    cpu_registers.halted = false;

    cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
    address_space.write_address_u16(cpu_registers.sp, cpu_registers.pc);

    let pending = pending_interrupts(address_space);
    for interrupt_type in InterruptType::PRIORITY_ORDER {
        if pending & interrupt_type.flag_bit() != 0 {
            log::trace!(
                "servicing {interrupt_type:?} interrupt, handler {:04X}",
                interrupt_type.handler_address()
            );

            cpu_registers.ime = false;
            address_space
                .get_io_registers_mut()
                .interrupt_flags()
                .clear(interrupt_type);
            cpu_registers.pc = interrupt_type.handler_address();
            return;
        }
    }
}

/// Run the CPU for one step: service a pending interrupt, idle while halted, or fetch/decode/
/// execute the instruction at PC.
///
/// Returns the number of machine cycles consumed. A return value of 0 means the opcode at PC is
/// not a valid LR35902 instruction; the caller is expected to treat this as fatal.
pub fn tick(address_space: &mut AddressSpace, cpu_registers: &mut CpuRegisters) -> u32 {
    if interrupt_triggered(cpu_registers, address_space) {
        execute_interrupt_service_routine(cpu_registers, address_space);
        return ISR_M_CYCLES;
    }

    if cpu_registers.halted {
        if interrupt_triggered_no_ime_check(address_space) {
            // Wake up without clearing the pending flag; with IME clear the interrupt is
            // not serviced
            cpu_registers.halted = false;
        } else {
            return 1;
        }
    }

    match instructions::parse_next_instruction(address_space, cpu_registers.pc) {
        Ok((instruction, pc)) => {
            log::trace!(
                "executing {instruction:02X?} at {:04X}, PC advances to {pc:04X}",
                cpu_registers.pc
            );

            cpu_registers.pc = pc;
            let m_cycles = instruction.m_cycles_required(cpu_registers);
            instruction.execute(address_space, cpu_registers);

            m_cycles
        }
        Err(err) => {
            log::error!("{err} at PC {:04X}", cpu_registers.pc);
            0
        }
    }
}
