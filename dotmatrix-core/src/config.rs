use std::fmt::Formatter;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub rom_file_path: String,
    pub window_scale: u32,
}

impl std::fmt::Display for RunConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "rom_file_path: {}", self.rom_file_path)?;
        writeln!(f, "window_scale: {}", self.window_scale)?;

        Ok(())
    }
}
