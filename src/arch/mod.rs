pub mod reg;
pub mod stm32l4;

pub use stm32l4::Board;
