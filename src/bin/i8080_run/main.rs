//! `i8080-run`: loads a binary image and runs it against the `i8080_core`
//! engine. With `--cpm`, installs the CP/M BDOS test-harness conventions so
//! unmodified `.COM` conformance binaries (`TST8080.COM`, `CPUTEST.COM`,
//! `8080EXM.COM`) run to completion without a real CP/M underneath them.

mod cpm;
mod rom;

use std::path::PathBuf;
use std::process::exit;

use i8080_core::cpu::{Cpu, Signal};
use i8080_core::memory::FlatMemory;

struct Args {
    rom_path: PathBuf,
    base: u16,
    cpm: bool,
}

fn parse_args() -> Args {
    let mut rom_path = None;
    let mut base = 0x0100u16;
    let mut cpm = false;

    let mut argv = std::env::args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--cpm" => cpm = true,
            "--base" => {
                let value = argv.next().unwrap_or_else(|| {
                    eprintln!("--base requires a hex address argument");
                    exit(1);
                });
                let value = value.trim_start_matches("0x").trim_start_matches("0X");
                base = u16::from_str_radix(value, 16).unwrap_or_else(|_| {
                    eprintln!("invalid --base value: {value}");
                    exit(1);
                });
            }
            other => {
                if rom_path.is_some() {
                    eprintln!("unexpected extra argument: {other}");
                    exit(1);
                }
                rom_path = Some(PathBuf::from(other));
            }
        }
    }

    let rom_path = rom_path.unwrap_or_else(|| {
        eprintln!("usage: i8080-run <rom-path> [--base 0xNNNN] [--cpm]");
        exit(1);
    });

    Args { rom_path, base, cpm }
}

fn main() {
    let args = parse_args();

    let mut mem = FlatMemory::new();
    if let Err(err) = rom::load_rom(&mut mem, &args.rom_path, args.base) {
        eprintln!("{err}");
        exit(1);
    }

    let mut cpu = Cpu::new();
    cpu.pc = args.base;

    let mut io = cpm::CpmIo::default();
    if args.cpm {
        cpm::install_harness(&mut mem);
    }

    loop {
        let step = cpu.step(&mut mem, &mut io);
        let step = step.unwrap_or_else(|err| {
            eprintln!("{err}");
            eprintln!("{}", cpu.dump_state(&mut mem));
            exit(1);
        });
        let _ = step;

        if args.cpm {
            cpm::drain_pending_print(&mut io, &cpu, &mut mem);
        }

        if io.signal == Signal::Exit || cpu.signal == Signal::Exit {
            break;
        }
    }

    println!();
    println!("{}", cpu.dump_state(&mut mem));
}
