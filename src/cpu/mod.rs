//! CPU state and the fetch-decode-execute engine.
//!
//! [`Cpu`] owns the full architectural state: eight 8-bit registers, `PC`,
//! `SP`, the cycle counter, and the signal buffer the host polls between
//! instructions. It never owns memory or I/O: those are borrowed for the
//! duration of each [`Cpu::step`] call through the [`MemoryBus`] and
//! [`IoBus`] traits, so one engine can drive any number of independent
//! machines.

pub mod dispatch;
pub mod flags;
pub mod helpers;
pub mod registers;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::io::IoBus;
use crate::memory::MemoryBus;

/// Values the engine (via an I/O port callback) can leave for the host to
/// observe between instructions. The engine itself only ever writes this
/// through [`Cpu::raise_exit`], which a host's `IoBus::write_io` calls when
/// it recognizes the CP/M exit convention on port 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    #[default]
    None,
    Exit,
}

/// The one way `Cpu::step` can fail: an illegal opcode was fetched while
/// illegal-opcode aliasing was disabled. With aliasing enabled (the
/// default), `step` cannot return an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    IllegalOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::IllegalOpcode { opcode, pc } => {
                write!(f, "illegal opcode {:#04X} at PC {:#06X}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for CpuError {}

/// Intel 8080 architectural state.
#[derive(Debug, Clone)]
pub struct Cpu {
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub a: u8,
    pub f: u8,
    pub pc: u16,
    pub sp: u16,
    pub cycles: u64,
    pub signal: Signal,
    /// When `true`, the twelve officially-undocumented opcodes fault with
    /// [`CpuError::IllegalOpcode`] instead of being treated as aliases of
    /// their documented cousins. `false` (the default) is what every CP/M
    /// conformance ROM expects.
    pub strict_illegal_opcodes: bool,
}

impl Cpu {
    /// A freshly reset CPU: every register zero except `F`, which carries
    /// the always-one reserved bit (`0x02`). `PC`/`SP` are left at zero;
    /// hosts set `PC` explicitly (test ROMs conventionally start at
    /// `0x0100`) and `SP` is initialised by the loaded program itself via
    /// `LXI SP`.
    pub fn new() -> Self {
        Self {
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            a: 0,
            f: 0x02,
            pc: 0,
            sp: 0,
            cycles: 0,
            signal: Signal::None,
            strict_illegal_opcodes: false,
        }
    }

    /// Like [`Cpu::new`], but with illegal-opcode aliasing disabled from
    /// the start.
    pub fn new_strict() -> Self {
        Self {
            strict_illegal_opcodes: true,
            ..Self::new()
        }
    }

    /// Executes exactly one instruction: fetch, decode, dispatch, mutate,
    /// account cycles. Returns the number of T-states the instruction
    /// consumed and also adds that count to `self.cycles`. Fails only when
    /// `strict_illegal_opcodes` is set and the fetched opcode is one of the
    /// twelve undocumented values.
    pub fn step(
        &mut self,
        mem: &mut impl MemoryBus,
        io: &mut impl IoBus,
    ) -> Result<u32, CpuError> {
        let consumed = dispatch::execute(self, mem, io)?;
        self.cycles += consumed as u64;
        Ok(consumed)
    }

    /// Sets the signal buffer to `Exit`. Intended to be called by a host's
    /// `IoBus::write_io` implementation when it recognizes the CP/M
    /// program-exit convention (a write to port 0).
    pub fn raise_exit(&mut self) {
        self.signal = Signal::Exit;
    }

    /// Formats a single debugging line:
    /// `PC: XXXX, AF: XXXX, BC: XXXX, DE: XXXX, HL: XXXX, SP: XXXX, CYC: N  (b0 b1 b2 b3)`
    /// where `b0..b3` are the four bytes starting at `PC`.
    pub fn dump_state(&self, mem: &mut impl MemoryBus) -> String {
        let b0 = mem.read(self.pc);
        let b1 = mem.read(self.pc.wrapping_add(1));
        let b2 = mem.read(self.pc.wrapping_add(2));
        let b3 = mem.read(self.pc.wrapping_add(3));
        format!(
            "PC: {:04X}, AF: {:04X}, BC: {:04X}, DE: {:04X}, HL: {:04X}, SP: {:04X}, CYC: {}  ({:02X} {:02X} {:02X} {:02X})",
            self.pc,
            self.psw(),
            self.bc(),
            self.de(),
            self.hl(),
            self.sp,
            self.cycles,
            b0,
            b1,
            b2,
            b3,
        )
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
