//! I/O port bus: the 8080's `IN`/`OUT` protocol.
//!
//! Port numbers are 8-bit. The engine treats every port as opaque, and the
//! host decides what a read or write to any given port means. The CP/M
//! test harness (see the `i8080-run` binary) is one such host: it uses
//! port 0 to signal program exit and port 1 to drive a BDOS-style print
//! emulation.
pub trait IoBus {
    /// Reads a byte from `port`.
    fn read_io(&mut self, port: u8) -> u8;

    /// Writes `value` (the contents of the accumulator at the time of the
    /// `OUT`) to `port`.
    fn write_io(&mut self, port: u8, value: u8);
}
