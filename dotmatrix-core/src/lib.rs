mod config;
mod cpu;
mod eventloop;
mod graphics;
mod input;
mod memory;
mod ppu;
mod startup;
mod timer;

use std::error::Error;

pub use config::RunConfig;
pub use eventloop::RunError;
pub use memory::CartridgeLoadError;
pub use startup::StartupError;

/// Load the configured ROM and run the emulator until it exits.
pub fn run(run_config: RunConfig) -> Result<(), Box<dyn Error>> {
    let emulation_state = startup::init_emulation_state(&run_config)?;
    let sdl_state = startup::init_sdl_state(&run_config)?;

    eventloop::run(emulation_state, sdl_state, &run_config)?;

    Ok(())
}
