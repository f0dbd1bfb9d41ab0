use crate::cpu::InterruptType;
use crate::memory::ioregisters::{IoRegister, IoRegisters};

const DIV_UPDATE_FREQUENCY: u32 = 256;

/// Internal t-cycle accumulators for the divider and timer counters. The DIV/TIMA/TMA/TAC
/// registers themselves live in the I/O register file.
#[derive(Debug, Clone)]
pub struct TimerState {
    div_cycles: u32,
    tima_cycles: u32,
}

impl TimerState {
    pub fn new() -> Self {
        Self {
            div_cycles: 0,
            tima_cycles: 0,
        }
    }
}

fn tima_threshold(timer_control: u8) -> u32 {
    match timer_control & 0x03 {
        0x00 => 1024,
        0x01 => 16,
        0x02 => 64,
        0x03 => 256,
        _ => unreachable!("value & 0x03 is always 0-3"),
    }
}

/// Advance the divider and timer registers by the given number of t-cycles.
///
/// DIV increments once every 256 t-cycles regardless of TAC. TIMA increments at the frequency
/// selected by TAC bits 0-1 while TAC bit 2 is set; on overflow it is reloaded from TMA and the
/// timer interrupt is requested.
pub fn tick(io_registers: &mut IoRegisters, timer: &mut TimerState, t_cycles: u32) {
    let mut div = io_registers.read_register(IoRegister::DIV);
    let mut tima = io_registers.read_register(IoRegister::TIMA);
    let timer_modulo = io_registers.read_register(IoRegister::TMA);
    let timer_control = io_registers.read_register(IoRegister::TAC);

    timer.div_cycles += t_cycles;
    while timer.div_cycles >= DIV_UPDATE_FREQUENCY {
        timer.div_cycles -= DIV_UPDATE_FREQUENCY;
        div = div.wrapping_add(1);
    }

    if timer_control & 0x04 != 0 {
        timer.tima_cycles += t_cycles;

        let threshold = tima_threshold(timer_control);
        while timer.tima_cycles >= threshold {
            timer.tima_cycles -= threshold;

            match tima.overflowing_add(1) {
                (new_tima, false) => {
                    tima = new_tima;
                }
                (_, true) => {
                    tima = timer_modulo;
                    io_registers.interrupt_flags().set(InterruptType::Timer);
                }
            }
        }
    }

    io_registers.write_register(IoRegister::DIV, div);
    io_registers.write_register(IoRegister::TIMA, tima);
}
