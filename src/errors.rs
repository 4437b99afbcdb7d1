use std::fmt;

#[derive(Debug, PartialEq)]
pub enum Error {
    OutOfBounds(u16),
    InvalidRegister(u8),
    IllegalInstruction(u8),
    DivisionByZero,
    StackUnderflow,
    StackOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f:&mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match self {
            OutOfBounds(addr) => write!(f, "Invalid memory access at {:#04X}", addr),
            InvalidRegister(index) => write!(f, "Invalid register R{}", index),
            IllegalInstruction(byte) => write!(f, "Illegal instruction {:#04X}", byte),
            DivisionByZero => write!(f, "Division by zero"),
            StackUnderflow => write!(f, "Attempted to pop past the top of memory"),
            StackOverflow => write!(f, "Stack grew past the bottom of memory"),
        }
    }
}

impl std::error::Error for Error {}
