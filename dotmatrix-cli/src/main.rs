use clap::Parser;
use dotmatrix_core::RunConfig;
use std::error::Error;
use std::process;

#[derive(Parser)]
struct Cli {
    /// Path to the ROM image to run
    rom_file_path: String,
    /// Integer window scale factor
    #[arg(default_value_t = 1)]
    window_scale: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Cli::parse();

    if args.window_scale == 0 {
        eprintln!("window scale must be at least 1");
        process::exit(1);
    }

    let run_config = RunConfig {
        rom_file_path: args.rom_file_path,
        window_scale: args.window_scale,
    };

    dotmatrix_core::run(run_config)
}
