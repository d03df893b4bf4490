//! Per-family instruction coverage: every data-transfer, logical,
//! control-transfer, stack, and I/O instruction exercised at least once.

use crate::cpu::Cpu;
use crate::io::IoBus;
use crate::memory::{FlatMemory, MemoryBus};

use super::NullIo;

#[test]
fn mov_between_registers() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.b = 0x42;
    mem.write(0, 0x78); // MOV A,B
    let cycles = cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.a, 0x42);
    assert_eq!(cycles, 5);
}

#[test]
fn mov_through_memory_costs_seven_cycles() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.set_hl(0x3000);
    cpu.a = 0x99;
    mem.write(0, 0x77); // MOV M,A
    let cycles = cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(mem.read(0x3000), 0x99);
    assert_eq!(cycles, 7);
}

#[test]
fn mvi_loads_immediate_into_register() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    mem.write(0, 0x0E); // MVI C, d8
    mem.write(1, 0x77);
    let cycles = cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.c, 0x77);
    assert_eq!(cpu.pc, 2);
    assert_eq!(cycles, 7);
}

#[test]
fn lda_sta_round_trip_direct_address() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.a = 0xAB;
    mem.write(0, 0x32); // STA 0x4000
    mem.write_word(1, 0x4000);
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(mem.read(0x4000), 0xAB);

    cpu.a = 0;
    mem.write(3, 0x3A); // LDA 0x4000
    mem.write_word(4, 0x4000);
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.a, 0xAB);
}

#[test]
fn lhld_shld_round_trip() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.set_hl(0xBEEF);
    mem.write(0, 0x22); // SHLD 0x5000
    mem.write_word(1, 0x5000);
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(mem.read_word(0x5000), 0xBEEF);

    cpu.set_hl(0);
    mem.write(3, 0x2A); // LHLD 0x5000
    mem.write_word(4, 0x5000);
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.hl(), 0xBEEF);
}

#[test]
fn ldax_stax_use_bc_and_de() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.set_bc(0x2000);
    cpu.a = 0x55;
    mem.write(0, 0x02); // STAX B
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(mem.read(0x2000), 0x55);

    cpu.a = 0;
    mem.write(1, 0x0A); // LDAX B
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.a, 0x55);
}

#[test]
fn xchg_swaps_de_and_hl() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.set_de(0x1111);
    cpu.set_hl(0x2222);
    mem.write(0, 0xEB);
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.de(), 0x2222);
    assert_eq!(cpu.hl(), 0x1111);
}

#[test]
fn sphl_and_pchl_move_hl_into_sp_and_pc() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.set_hl(0x8000);
    mem.write(0, 0xF9); // SPHL
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.sp, 0x8000);

    cpu.set_hl(0x9000);
    mem.write(1, 0xE9); // PCHL
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.pc, 0x9000);
}

#[test]
fn ana_ora_xra_registers() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.a = 0b1100;
    cpu.b = 0b1010;
    mem.write(0, 0xA0); // ANA B
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.a, 0b1000);

    cpu.a = 0b1100;
    cpu.b = 0b0011;
    mem.write(1, 0xB0); // ORA B
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.a, 0b1111);

    cpu.a = 0b1111;
    cpu.b = 0b1010;
    mem.write(2, 0xA8); // XRA B
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.a, 0b0101);
}

#[test]
fn jmp_and_conditional_jump() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    mem.write(0, 0xC3); // JMP 0x1000
    mem.write_word(1, 0x1000);
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.pc, 0x1000);

    // Z is clear; JZ should not be taken but must still skip the operand.
    mem.write(0x1000, 0xCA); // JZ 0x2000
    mem.write_word(0x1001, 0x2000);
    let cycles = cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.pc, 0x1003);
    assert_eq!(cycles, 10);
}

#[test]
fn rst_pushes_pc_and_jumps_to_fixed_vector() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.sp = 0x2000;
    mem.write(0x0100, 0xCF); // RST 1
    cpu.pc = 0x0100;
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.pc, 0x0008);
    assert_eq!(cpu.pop_word(&mut mem), 0x0101);
}

#[test]
fn push_pop_register_pairs() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    cpu.sp = 0x3000;
    cpu.set_bc(0x1234);
    mem.write(0, 0xC5); // PUSH B
    cpu.step(&mut mem, &mut io).unwrap();
    cpu.set_bc(0);
    mem.write(1, 0xC1); // POP B
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.bc(), 0x1234);
    assert_eq!(cpu.sp, 0x3000);
}

struct RecordingIo {
    last_out: Option<(u8, u8)>,
}

impl IoBus for RecordingIo {
    fn read_io(&mut self, port: u8) -> u8 {
        0xAA ^ port
    }

    fn write_io(&mut self, port: u8, value: u8) {
        self.last_out = Some((port, value));
    }
}

#[test]
fn in_and_out_talk_to_the_io_bus() {
    let mut cpu = Cpu::new();
    let mut mem = FlatMemory::new();
    let mut io = RecordingIo { last_out: None };

    mem.write(0, 0xDB); // IN 0x05
    mem.write(1, 0x05);
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(cpu.a, 0xAA ^ 0x05);

    cpu.a = 0x77;
    mem.write(2, 0xD3); // OUT 0x06
    mem.write(3, 0x06);
    cpu.step(&mut mem, &mut io).unwrap();
    assert_eq!(io.last_out, Some((0x06, 0x77)));
}

#[test]
fn illegal_opcode_is_aliased_by_default_but_fatal_in_strict_mode() {
    let mut mem = FlatMemory::new();
    let mut io = NullIo;
    mem.write(0, 0xDD); // illegal alias of CALL
    mem.write_word(1, 0x9000);

    let mut lenient = Cpu::new();
    lenient.sp = 0x2000;
    let cycles = lenient.step(&mut mem, &mut io).unwrap();
    assert_eq!(lenient.pc, 0x9000);
    assert_eq!(cycles, 17);

    let mut strict = Cpu::new_strict();
    let err = strict.step(&mut mem, &mut io).unwrap_err();
    match err {
        crate::cpu::CpuError::IllegalOpcode { opcode, pc } => {
            assert_eq!(opcode, 0xDD);
            assert_eq!(pc, 0);
        }
    }
}
