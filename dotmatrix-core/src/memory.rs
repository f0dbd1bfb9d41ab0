pub mod address;
pub mod ioregisters;
mod mapper;

use crate::memory::ioregisters::{IoRegister, IoRegisters};
use crate::memory::mapper::{Mapper, MapperType};
use crate::ppu::{self, Color, SpriteAttributes, TileRows};
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartridgeLoadError {
    #[error("header should be at least 336 bytes, was {header_len} bytes")]
    HeaderTooShort { header_len: usize },
    #[error("unsupported cartridge type byte in header: {type_byte:02X}")]
    UnsupportedCartridgeType { type_byte: u8 },
    #[error("invalid RAM size code, expected 0-5: {ram_size_code}")]
    InvalidRamSize { ram_size_code: u8 },
    #[error("error reading data from {file_path}: {source}")]
    FileReadError {
        file_path: String,
        #[source]
        source: io::Error,
    },
}

fn load_sav_file<P>(sav_file: P) -> Result<Option<Vec<u8>>, CartridgeLoadError>
where
    P: AsRef<Path>,
{
    let ram = if fs::metadata(sav_file.as_ref())
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
    {
        Some(
            fs::read(sav_file.as_ref()).map_err(|err| CartridgeLoadError::FileReadError {
                file_path: sav_file.as_ref().to_str().unwrap_or("").into(),
                source: err,
            })?,
        )
    } else {
        None
    };

    if ram.is_some() {
        log::info!("Loaded cartridge RAM from {}", sav_file.as_ref().display());
    }

    Ok(ram)
}

pub struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    mapper: Mapper,
    title: String,
    sav_path: Option<PathBuf>,
}

impl Cartridge {
    /// Create a new Cartridge value from the given ROM image.
    ///
    /// # `CartridgeLoadError`
    ///
    /// This function will return an error in the following scenarios:
    /// * The ROM is too short to contain a header (must be at least 0x150 bytes)
    /// * The cartridge type byte names a mapper this emulator does not support
    /// * The RAM size byte in the cartridge header is invalid
    pub fn new(rom: Vec<u8>, sav_path: Option<PathBuf>) -> Result<Self, CartridgeLoadError> {
        log::info!("Initializing cartridge using {} bytes of data", rom.len());

        if rom.len() < 0x0150 {
            return Err(CartridgeLoadError::HeaderTooShort {
                header_len: rom.len(),
            });
        }

        let type_byte = rom[address::CARTRIDGE_TYPE as usize];
        let Some(mapper_type) = mapper::parse_byte(type_byte) else {
            return Err(CartridgeLoadError::UnsupportedCartridgeType { type_byte });
        };

        let title = parse_title(&rom);

        log::info!("Cartridge title: {title}");
        log::info!("Cartridge type: {} (byte {type_byte:02X})", mapper_type.name());
        log::info!("Licensee: {}", licensee_description(&rom));
        log::info!(
            "ROM size: {} bytes (header code {:02X})",
            rom.len(),
            rom[address::ROM_SIZE as usize]
        );

        let ram_size = match mapper_type {
            // MBC2 has 512 half-byte cells built into the mapper chip; the header declares no RAM
            MapperType::Mbc2 => 512,
            _ => {
                let ram_size_code = rom[address::RAM_SIZE as usize];
                match ram_size_code {
                    0x00 => 0,
                    0x01 => 2048,
                    0x02 => 8192,
                    0x03 => 32768,
                    0x04 => 131072,
                    0x05 => 65536,
                    _ => return Err(CartridgeLoadError::InvalidRamSize { ram_size_code }),
                }
            }
        };

        let loaded_ram = match &sav_path {
            Some(sav_path) if ram_size > 0 => load_sav_file(sav_path)?,
            _ => None,
        };

        let mut ram = loaded_ram.unwrap_or_else(|| vec![0; ram_size]);
        if ram.len() != ram_size {
            log::warn!(
                "save file size {} does not match declared RAM size {ram_size}, resizing",
                ram.len()
            );
            ram.resize(ram_size, 0);
        }

        log::info!("Cartridge has {} bytes of external RAM", ram.len());

        let mapper = Mapper::new(mapper_type, rom.len() as u32, ram.len() as u32);

        Ok(Self {
            rom,
            ram,
            mapper,
            title,
            sav_path,
        })
    }

    pub fn from_file(file_path: &str) -> Result<Self, CartridgeLoadError> {
        log::info!("Loading cartridge from '{file_path}'");

        let rom =
            fs::read(Path::new(file_path)).map_err(|err| CartridgeLoadError::FileReadError {
                file_path: file_path.into(),
                source: err,
            })?;

        let sav_path = Path::new(file_path).with_extension("sav");

        Self::new(rom, Some(sav_path))
    }

    /// The game title from the cartridge header (0x134-0x142).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Read a value from the given ROM address. Addresses past the end of the ROM wrap around.
    pub fn read_rom_address(&self, address: u16) -> u8 {
        let mapped_address = self.mapper.map_rom_address(address) as usize;
        self.rom[mapped_address % self.rom.len()]
    }

    /// Write a value to the given ROM address (in reality, set a cartridge banking register).
    pub fn write_rom_address(&mut self, address: u16, value: u8) {
        self.mapper.write_rom_address(address, value);
    }

    /// Read a value from the given cartridge RAM address. Returns 0xFF if RAM is disabled or not
    /// present.
    pub fn read_ram_address(&self, address: u16) -> u8 {
        match self.mapper.map_ram_address(address) {
            Some(mapped_address) if !self.ram.is_empty() => {
                self.ram[mapped_address as usize % self.ram.len()]
            }
            _ => 0xFF,
        }
    }

    /// Write a value to the given cartridge RAM address. The write is dropped if RAM is disabled
    /// or not present.
    pub fn write_ram_address(&mut self, address: u16, value: u8) {
        if let Some(mapped_address) = self.mapper.map_ram_address(address) {
            if !self.ram.is_empty() {
                let len = self.ram.len();
                self.ram[mapped_address as usize % len] = value & self.mapper.ram_write_mask();
            }
        }
    }

    /// Write the cartridge RAM vector verbatim to the sav sidecar file, if this cartridge has RAM.
    pub fn save_ram(&self) -> Result<(), io::Error> {
        let Some(sav_path) = &self.sav_path else {
            return Ok(());
        };

        if self.ram.is_empty() {
            return Ok(());
        }

        fs::write(sav_path, &self.ram)?;
        log::info!("Wrote cartridge RAM to {}", sav_path.display());

        Ok(())
    }
}

fn parse_title(rom: &[u8]) -> String {
    rom[address::TITLE_START as usize..=address::TITLE_END as usize]
        .iter()
        .copied()
        .take_while(|&byte| byte != 0)
        .map(char::from)
        .collect()
}

fn licensee_description(rom: &[u8]) -> String {
    let old_code = rom[address::OLD_LICENSEE_CODE as usize];
    if old_code == 0x33 {
        // 0x33 defers to the two-character ASCII code at 0x0144-0x0145
        let new_code = &rom
            [address::NEW_LICENSEE_CODE as usize..=address::NEW_LICENSEE_CODE as usize + 1];
        format!(
            "new code '{}{}'",
            char::from(new_code[0]),
            char::from(new_code[1])
        )
    } else {
        format!("old code {old_code:02X}")
    }
}

pub struct AddressSpace {
    cartridge: Cartridge,
    vram: [u8; 8192],
    working_ram: [u8; 8192],
    oam: [u8; 160],
    io_registers: IoRegisters,
    hram: [u8; 127],
    ie_register: u8,
    // Latched joypad matrix, inverted convention (0 = pressed). Bits 0-3 are A/B/Select/Start,
    // bits 4-7 are Right/Left/Up/Down.
    joypad_state: u8,
    tiles: Box<[TileRows; 384]>,
    sprites: [SpriteAttributes; 40],
    bg_palette: [Color; 4],
    obj_palette_0: [Color; 4],
    obj_palette_1: [Color; 4],
}

impl AddressSpace {
    pub fn new(cartridge: Cartridge) -> Self {
        let io_registers = IoRegisters::new();

        let bg_palette = ppu::decode_palette(io_registers.read_register(IoRegister::BGP));
        let obj_palette_0 = ppu::decode_palette(io_registers.read_register(IoRegister::OBP0));
        let obj_palette_1 = ppu::decode_palette(io_registers.read_register(IoRegister::OBP1));

        Self {
            cartridge,
            vram: [0; 8192],
            working_ram: [0; 8192],
            oam: [0; 160],
            io_registers,
            hram: [0; 127],
            ie_register: 0,
            joypad_state: 0xFF,
            tiles: Box::new([TileRows::default(); 384]),
            sprites: [SpriteAttributes::new(); 40],
            bg_palette,
            obj_palette_0,
            obj_palette_1,
        }
    }

    /// Read the value at the given address from the perspective of the CPU.
    pub fn read_address_u8(&self, address: u16) -> u8 {
        match address {
            address @ address::ROM_START..=address::ROM_END => {
                self.cartridge.read_rom_address(address)
            }
            address @ address::VRAM_START..=address::VRAM_END => {
                self.vram[(address - address::VRAM_START) as usize]
            }
            address @ address::EXTERNAL_RAM_START..=address::EXTERNAL_RAM_END => {
                self.cartridge.read_ram_address(address)
            }
            address @ address::WORKING_RAM_START..=address::WORKING_RAM_END => {
                self.working_ram[(address - address::WORKING_RAM_START) as usize]
            }
            address @ address::ECHO_RAM_START..=address::ECHO_RAM_END => {
                log::warn!("redirecting read of echo RAM address {address:04X} to working RAM");
                self.working_ram[(address - address::ECHO_RAM_START) as usize]
            }
            address @ address::OAM_START..=address::OAM_END => {
                self.oam[(address - address::OAM_START) as usize]
            }
            address @ address::UNUSABLE_START..=address::UNUSABLE_END => {
                log::warn!("read of unusable address {address:04X}, returning FF");
                0xFF
            }
            address @ address::IO_REGISTERS_START..=address::IO_REGISTERS_END => {
                if address == IoRegister::JOYP.to_address() {
                    self.read_joyp()
                } else {
                    self.io_registers.read_address(address)
                }
            }
            address @ address::HRAM_START..=address::HRAM_END => {
                self.hram[(address - address::HRAM_START) as usize]
            }
            address::IE_REGISTER => self.ie_register,
        }
    }

    /// Read the value at the given address and the following address as a little-endian 16-bit
    /// value.
    pub fn read_address_u16(&self, address: u16) -> u16 {
        let lsb = self.read_address_u8(address);
        let msb = self.read_address_u8(address.wrapping_add(1));
        u16::from_le_bytes([lsb, msb])
    }

    /// Assign a value to the given address from the perspective of the CPU.
    pub fn write_address_u8(&mut self, address: u16, value: u8) {
        match address {
            address @ address::ROM_START..=address::ROM_END => {
                self.cartridge.write_rom_address(address, value);
            }
            address @ address::VRAM_START..=address::VRAM_END => {
                self.vram[(address - address::VRAM_START) as usize] = value;
                if address <= address::TILE_DATA_END {
                    self.refresh_tile_row(address);
                }
            }
            address @ address::EXTERNAL_RAM_START..=address::EXTERNAL_RAM_END => {
                self.cartridge.write_ram_address(address, value);
            }
            address @ address::WORKING_RAM_START..=address::WORKING_RAM_END => {
                self.working_ram[(address - address::WORKING_RAM_START) as usize] = value;
            }
            address @ address::ECHO_RAM_START..=address::ECHO_RAM_END => {
                log::warn!(
                    "redirecting write of {value:02X} to echo RAM address {address:04X} to working RAM"
                );
                self.working_ram[(address - address::ECHO_RAM_START) as usize] = value;
            }
            address @ address::OAM_START..=address::OAM_END => {
                self.write_oam_byte(address - address::OAM_START, value);
            }
            address @ address::UNUSABLE_START..=address::UNUSABLE_END => {
                log::warn!("ignoring write of {value:02X} to unusable address {address:04X}");
            }
            address @ address::IO_REGISTERS_START..=address::IO_REGISTERS_END => {
                self.write_io_register(address, value);
            }
            address @ address::HRAM_START..=address::HRAM_END => {
                self.hram[(address - address::HRAM_START) as usize] = value;
            }
            address::IE_REGISTER => {
                self.ie_register = value;
            }
        }
    }

    /// Assign a 16-bit value to the given address and the following address, using little-endian.
    pub fn write_address_u16(&mut self, address: u16, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.write_address_u8(address, lsb);
        self.write_address_u8(address.wrapping_add(1), msb);
    }

    fn write_io_register(&mut self, address: u16, value: u8) {
        let Some(register) = IoRegister::from_address(address) else {
            return;
        };

        match register {
            IoRegister::JOYP => {
                // Only the selection nibble is writable
                self.io_registers.write_register(IoRegister::JOYP, value & 0x30);
            }
            IoRegister::DIV => {
                // Any write resets the divider
                self.io_registers.write_register(IoRegister::DIV, 0x00);
            }
            IoRegister::LY => {
                // LY is read-only; writes reset the scanline counter
                self.io_registers.write_register(IoRegister::LY, 0x00);
            }
            IoRegister::LCDC => {
                self.io_registers.write_register(IoRegister::LCDC, value);
                if value & 0x80 == 0 {
                    // Turning the LCD off resets LY and forces the mode bits to HBLANK
                    self.io_registers.write_register(IoRegister::LY, 0x00);
                    let stat = self.io_registers.read_register(IoRegister::STAT);
                    self.io_registers
                        .write_register(IoRegister::STAT, stat & !0x03);
                }
            }
            IoRegister::DMA => {
                self.io_registers.write_register(IoRegister::DMA, value);
                self.run_oam_dma_transfer(value);
            }
            IoRegister::BGP => {
                self.io_registers.write_register(IoRegister::BGP, value);
                self.bg_palette = ppu::decode_palette(value);
            }
            IoRegister::OBP0 => {
                self.io_registers.write_register(IoRegister::OBP0, value);
                self.obj_palette_0 = ppu::decode_palette(value);
            }
            IoRegister::OBP1 => {
                self.io_registers.write_register(IoRegister::OBP1, value);
                self.obj_palette_1 = ppu::decode_palette(value);
            }
            _ => {
                self.io_registers.write_register(register, value);
            }
        }
    }

    fn read_joyp(&self) -> u8 {
        // The selection bits are active-low; only one of the two nibbles of the latched matrix is
        // visible at a time
        match self.io_registers.read_register(IoRegister::JOYP) & 0x30 {
            0x10 => (self.joypad_state & 0x0F) | 0x10,
            0x20 => (self.joypad_state >> 4) | 0x20,
            _ => 0x3F,
        }
    }

    fn refresh_tile_row(&mut self, address: u16) {
        let relative_address = (address - address::VRAM_START) as usize;
        let tile_index = relative_address >> 4;
        let row = (relative_address >> 1) & 0x07;

        // Each row is stored as two bitplane bytes, low bits first
        let row_start = (tile_index << 4) | (row << 1);
        let low_bits = self.vram[row_start];
        let high_bits = self.vram[row_start + 1];

        for pixel in 0..8 {
            let bit = 7 - pixel;
            self.tiles[tile_index].0[row][pixel] =
                (((high_bits >> bit) & 0x01) << 1) | ((low_bits >> bit) & 0x01);
        }
    }

    fn write_oam_byte(&mut self, oam_offset: u16, value: u8) {
        self.oam[oam_offset as usize] = value;
        self.sprites[(oam_offset >> 2) as usize].update_field((oam_offset & 0x03) as u8, value);
    }

    fn run_oam_dma_transfer(&mut self, source_page: u8) {
        let source_address = u16::from(source_page) << 8;
        for offset in 0..0xA0 {
            let byte = self.read_address_u8(source_address + offset);
            self.write_oam_byte(offset, byte);
        }
    }

    pub fn get_io_registers(&self) -> &IoRegisters {
        &self.io_registers
    }

    pub fn get_io_registers_mut(&mut self) -> &mut IoRegisters {
        &mut self.io_registers
    }

    /// Retrieve the current value of the IE register (interrupts enabled).
    pub fn get_ie_register(&self) -> u8 {
        self.ie_register
    }

    /// The latched joypad matrix byte (inverted convention, 0 = pressed).
    pub fn joypad_state(&self) -> u8 {
        self.joypad_state
    }

    pub fn set_joypad_state(&mut self, joypad_state: u8) {
        self.joypad_state = joypad_state;
    }

    /// The decoded 8x8 pixel rows for the given tile index (0-383).
    pub fn tile(&self, tile_index: usize) -> &TileRows {
        &self.tiles[tile_index]
    }

    /// The decoded sprite attribute table.
    pub fn sprites(&self) -> &[SpriteAttributes; 40] {
        &self.sprites
    }

    pub fn bg_palette(&self) -> &[Color; 4] {
        &self.bg_palette
    }

    pub fn obj_palette(&self, use_obp1: bool) -> &[Color; 4] {
        if use_obp1 {
            &self.obj_palette_1
        } else {
            &self.obj_palette_0
        }
    }

    pub fn save_cartridge_ram(&self) -> Result<(), io::Error> {
        self.cartridge.save_ram()
    }
}
