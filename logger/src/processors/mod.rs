pub mod console;
pub mod minsev;
pub mod noop;
