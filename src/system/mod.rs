pub mod buffer;
pub mod collector;
pub mod command;
pub mod cpu;
pub mod disks;
pub mod fields;
pub mod gpu;
pub mod platform;
pub mod snapshot;
