//! 256-way opcode dispatch.
//!
//! One `match` on the fetched opcode byte, grouped by instruction family.
//! Register-field decoding (`(op >> 3) & 7`, `op & 7`, `(op >> 4) & 3`) is
//! pushed down into the family modules so each handler reads like the
//! instruction it implements rather than like bit-twiddling.

mod arithmetic;
mod compare;
mod control;
mod data_transfer;
mod io_ops;
mod logical;
mod rotate;
mod stack;

use crate::io::IoBus;
use crate::memory::MemoryBus;

use super::{Cpu, CpuError};

/// The twelve officially-undocumented 8080 opcodes and what they alias.
fn is_illegal_opcode(opcode: u8) -> bool {
    matches!(
        opcode,
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 | 0xCB | 0xD9 | 0xDD | 0xED | 0xFD
    )
}

/// Fetches, decodes, and executes exactly one instruction starting at
/// `cpu.pc`. Returns the T-state count consumed.
pub fn execute(
    cpu: &mut Cpu,
    mem: &mut impl MemoryBus,
    io: &mut impl IoBus,
) -> Result<u32, CpuError> {
    let pc_at_fetch = cpu.pc;
    let opcode = mem.read(pc_at_fetch);
    cpu.pc = cpu.pc.wrapping_add(1);

    if cpu.strict_illegal_opcodes && is_illegal_opcode(opcode) {
        return Err(CpuError::IllegalOpcode {
            opcode,
            pc: pc_at_fetch,
        });
    }

    let cycles = match opcode {
        // NOP and its six undocumented aliases.
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => 4,

        0x76 => control::hlt(cpu),

        0x40..=0x7F => data_transfer::mov(cpu, mem, opcode),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            data_transfer::mvi(cpu, mem, opcode)
        }
        0x01 | 0x11 | 0x21 | 0x31 => data_transfer::lxi(cpu, mem, opcode),
        0x0A | 0x1A => data_transfer::ldax(cpu, mem, opcode),
        0x02 | 0x12 => data_transfer::stax(cpu, mem, opcode),
        0x3A => data_transfer::lda(cpu, mem),
        0x32 => data_transfer::sta(cpu, mem),
        0x2A => data_transfer::lhld(cpu, mem),
        0x22 => data_transfer::shld(cpu, mem),
        0xEB => data_transfer::xchg(cpu),
        0xE3 => data_transfer::xthl(cpu, mem),
        0xF9 => data_transfer::sphl(cpu),
        0xE9 => data_transfer::pchl(cpu),

        0x80..=0x87 => arithmetic::add(cpu, mem, opcode),
        0x88..=0x8F => arithmetic::adc(cpu, mem, opcode),
        0x90..=0x97 => arithmetic::sub(cpu, mem, opcode),
        0x98..=0x9F => arithmetic::sbb(cpu, mem, opcode),
        0xC6 => arithmetic::adi(cpu, mem),
        0xCE => arithmetic::aci(cpu, mem),
        0xD6 => arithmetic::sui(cpu, mem),
        0xDE => arithmetic::sbi(cpu, mem),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            arithmetic::inr(cpu, mem, opcode)
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            arithmetic::dcr(cpu, mem, opcode)
        }
        0x03 | 0x13 | 0x23 | 0x33 => arithmetic::inx(cpu, opcode),
        0x0B | 0x1B | 0x2B | 0x3B => arithmetic::dcx(cpu, opcode),
        0x09 | 0x19 | 0x29 | 0x39 => arithmetic::dad(cpu, opcode),
        0x27 => arithmetic::daa(cpu),
        0x2F => arithmetic::cma(cpu),
        0x37 => arithmetic::stc(cpu),
        0x3F => arithmetic::cmc(cpu),

        0xA0..=0xA7 => logical::ana(cpu, mem, opcode),
        0xA8..=0xAF => logical::xra(cpu, mem, opcode),
        0xB0..=0xB7 => logical::ora(cpu, mem, opcode),
        0xE6 => logical::ani(cpu, mem),
        0xEE => logical::xri(cpu, mem),
        0xF6 => logical::ori(cpu, mem),

        0xB8..=0xBF => compare::cmp(cpu, mem, opcode),
        0xFE => compare::cpi(cpu, mem),

        0x07 => rotate::rlc(cpu),
        0x0F => rotate::rrc(cpu),
        0x17 => rotate::ral(cpu),
        0x1F => rotate::rar(cpu),

        0xC3 | 0xCB => control::jmp(cpu, mem),
        0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
            control::jcc(cpu, mem, opcode)
        }
        0xCD | 0xDD | 0xED | 0xFD => control::call(cpu, mem),
        0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
            control::ccc(cpu, mem, opcode)
        }
        0xC9 | 0xD9 => control::ret(cpu, mem),
        0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
            control::rcc(cpu, mem, opcode)
        }
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            control::rst(cpu, mem, opcode)
        }
        0xF3 => control::di(cpu),
        0xFB => control::ei(cpu),

        0xC5 | 0xD5 | 0xE5 | 0xF5 => stack::push(cpu, mem, opcode),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => stack::pop(cpu, mem, opcode),

        0xDB => io_ops::in_(cpu, mem, io),
        0xD3 => io_ops::out(cpu, mem, io),
    };

    Ok(cycles)
}
