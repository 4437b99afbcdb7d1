pub const TOM:u16 = 0x100; // Top Of Memory, exclusive (mem: 0x00-0xFF inclusive)
pub const NUM_REG:usize = 8;

pub const SP:usize = 7;       // register 7 doubles as the stack pointer
pub const SP_INIT:u8 = 0xF4;  // empty-stack value of the stack pointer

// flags reg
// x x x x    x L G E
pub const EQUAL_BIT:u8 = 0;
pub const GREATER_BIT:u8 = 1;
pub const LESS_BIT:u8 = 2;
