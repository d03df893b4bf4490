//! Core of an Intel 8080 microprocessor emulator: a cycle-counted
//! fetch-decode-execute engine faithful enough that CP/M `.COM`
//! conformance binaries run to completion with hardware-identical
//! observable state.
//!
//! The engine never owns memory or I/O. Hosts implement [`memory::MemoryBus`]
//! and [`io::IoBus`] and drive [`cpu::Cpu::step`] in a loop; the ROM loader,
//! CLI entry point, and CP/M BDOS test harness live in the `i8080-run`
//! binary built alongside this library, not in the core itself.

pub mod bit;
pub mod cpu;
pub mod io;
pub mod memory;

pub use cpu::{Cpu, CpuError, Signal};
pub use io::IoBus;
pub use memory::{FlatMemory, MemoryBus};
