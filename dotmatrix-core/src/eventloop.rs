use crate::graphics::{self, GraphicsError};
use crate::input;
use crate::memory::AddressSpace;
use crate::startup::{EmulationState, SdlState};
use crate::{cpu, ppu, timer, RunConfig};
use sdl2::event::Event;
use sdl2::EventPump;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("unimplemented opcode {opcode:02X} at PC {pc:04X}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },
    #[error("rendering error: {source}")]
    Rendering {
        #[from]
        source: GraphicsError,
    },
}

// One frame of 70224 t-cycles at 4.194304 MHz
const FRAME_DURATION: Duration = Duration::from_micros(16_740);

/// Run the emulator until it terminates, either because the window was closed or because the CPU
/// hit an unimplemented opcode.
pub fn run(
    emulation_state: EmulationState,
    sdl_state: SdlState,
    run_config: &RunConfig,
) -> Result<(), RunError> {
    log::info!("Running with config:\n{run_config}");

    let EmulationState {
        mut address_space,
        mut cpu_registers,
        mut ppu_state,
        mut timer_state,
    } = emulation_state;

    // The remaining SDL subsystem handles stay alive in sdl_state until the function returns
    let SdlState {
        mut canvas,
        mut event_pump,
        ..
    } = sdl_state;

    let texture_creator = canvas.texture_creator();
    let mut texture = graphics::create_frame_texture(&texture_creator)?;

    let mut frame_start = Instant::now();

    loop {
        let m_cycles = cpu::tick(&mut address_space, &mut cpu_registers);
        if m_cycles == 0 {
            let pc = cpu_registers.pc;
            let opcode = address_space.read_address_u8(pc);
            return Err(RunError::UnimplementedOpcode { opcode, pc });
        }

        let t_cycles = 4 * m_cycles;
        timer::tick(
            address_space.get_io_registers_mut(),
            &mut timer_state,
            t_cycles,
        );
        ppu::tick(&mut ppu_state, &mut address_space, t_cycles);

        if ppu_state.frame_ready() {
            // Sleep out the remainder of the hardware frame time before presenting
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                thread::sleep(FRAME_DURATION - elapsed);
            }
            frame_start = Instant::now();

            graphics::render_frame(&ppu_state, &mut canvas, &mut texture)?;
            ppu_state.clear_frame_ready();

            if !pump_events(&mut event_pump, &mut address_space) {
                break;
            }
        }
    }

    // The sav write failing is not fatal; the emulation itself was successful
    if let Err(err) = address_space.save_cartridge_ram() {
        log::error!("error writing cartridge RAM to sav file: {err}");
    }

    Ok(())
}

/// Poll SDL events, updating the joypad matrix. Returns false when the emulator should quit.
fn pump_events(event_pump: &mut EventPump, address_space: &mut AddressSpace) -> bool {
    for event in event_pump.poll_iter() {
        log::trace!("Received SDL event: {event:?}");
        match event {
            Event::Quit { .. } => {
                log::info!("Quit event received, exiting main loop");
                return false;
            }
            Event::KeyDown {
                keycode: Some(keycode),
                ..
            } => {
                if let Some(button) = input::button_for_keycode(keycode) {
                    input::set_button(address_space, button, true);
                    input::flag_interrupt(address_space);
                }
            }
            Event::KeyUp {
                keycode: Some(keycode),
                ..
            } => {
                if let Some(button) = input::button_for_keycode(keycode) {
                    input::set_button(address_space, button, false);
                }
            }
            _ => {}
        }
    }

    true
}
