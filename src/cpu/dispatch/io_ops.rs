//! `IN`/`OUT`, the 8080's I/O port protocol. Both cost 10 cycles; the
//! host-supplied `IoBus` decides what any given port means.

use crate::io::IoBus;
use crate::memory::MemoryBus;

use super::super::Cpu;

/// `IN d8`: `A ← port_in(d8)`.
pub fn in_(cpu: &mut Cpu, mem: &mut impl MemoryBus, io: &mut impl IoBus) -> u32 {
    let port = mem.read(cpu.pc);
    cpu.pc = cpu.pc.wrapping_add(1);
    cpu.a = io.read_io(port);
    10
}

/// `OUT d8`: `port_out(d8, A)`.
pub fn out(cpu: &mut Cpu, mem: &mut impl MemoryBus, io: &mut impl IoBus) -> u32 {
    let port = mem.read(cpu.pc);
    cpu.pc = cpu.pc.wrapping_add(1);
    io.write_io(port, cpu.a);
    10
}
