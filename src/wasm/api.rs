//! WASM API for the 6502 emulator.
//!
//! Provides JavaScript-callable interfaces for program loading, CPU control,
//! interrupt requests and state inspection.

use crate::{load_bytes, FlatMemory, MemoryBus, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl<E: std::error::Error> From<E> for JsError {
    fn from(err: E) -> Self {
        JsError::new(&err.to_string())
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create an emulator with zeroed memory, reset through a zero reset vector
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator6502 {
            cpu: CPU::new(FlatMemory::new()),
        }
    }

    /// Copy a program image into memory at `offset`
    ///
    /// Registers are untouched; call `reset()` once the vectors are in place.
    pub fn load_program(&mut self, program: &[u8], offset: u16) -> Result<usize, JsError> {
        Ok(load_bytes(self.cpu.memory_mut(), program, offset)?)
    }

    /// Reset the CPU, keeping memory contents
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Execute a single step (an interrupt service or one instruction)
    pub fn step(&mut self) -> Result<(), JsError> {
        Ok(self.cpu.step()?)
    }

    /// Execute multiple cycles and return actual cycles executed
    ///
    /// The last instruction may overshoot the budget; a total past
    /// `u32::MAX` is reported as `u32::MAX`.
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        let consumed = self.cpu.run_for_cycles(cycles as u64)?;
        Ok(cycles_for_js(consumed))
    }

    pub fn trigger_nmi(&mut self) {
        self.cpu.trigger_nmi();
    }

    pub fn trigger_irq(&mut self) {
        self.cpu.trigger_irq();
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copy a 256-byte page of memory into a typed array
    pub fn memory_page(&self, page: u8) -> js_sys::Uint8Array {
        let start = (page as usize) << 8;
        let bytes = &self.cpu.memory().as_slice()[start..start + 0x100];
        js_sys::Uint8Array::from(bytes)
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }
}

fn cycles_for_js(consumed: u64) -> u32 {
    u32::try_from(consumed).unwrap_or(u32::MAX)
}

impl Default for Emulator6502 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_count_saturates() {
        assert_eq!(cycles_for_js(0), 0);
        assert_eq!(cycles_for_js(u32::MAX as u64), u32::MAX);
        assert_eq!(cycles_for_js(u32::MAX as u64 + 6), u32::MAX);
    }

    #[test]
    fn test_run_for_cycles_reports_overshoot() {
        let mut emulator = Emulator6502::new();
        // JSR $0000 at the zeroed reset target: 6 cycles per instruction
        emulator.write_memory(0x0000, 0x20);
        emulator.reset();

        let consumed = emulator.run_for_cycles(4).map_err(|e| e.message()).unwrap();

        assert_eq!(consumed, 6);
        assert_eq!(emulator.cycles(), 6.0);
    }
}
