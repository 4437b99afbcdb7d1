use crate::errors::Error;
use std::convert::TryFrom;

/// One variant per LS-8 instruction byte. The top two bits of the raw byte
/// encode the operand count and are part of the opcode's identity, so a
/// decoded `Opcode` always knows exactly how many operand bytes follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Nop,
    Hlt,
    Ret,
    Iret,
    Push,
    Pop,
    Prn,
    Pra,
    Call,
    Int,
    Jmp,
    Jeq,
    Jne,
    Jgt,
    Jlt,
    Jle,
    Jge,
    Inc,
    Dec,
    Not,
    Ldi,
    Ld,
    St,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Cmp,
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

impl TryFrom<u8> for Opcode {
    type Error = Error;

    fn try_from(byte:u8) -> Result<Self, Error> {
        use Opcode::*;

        match byte {
            0b00000000 => Ok(Nop),
            0b00000001 => Ok(Hlt),
            0b00010001 => Ok(Ret),
            0b00010011 => Ok(Iret),
            0b01000101 => Ok(Push),
            0b01000110 => Ok(Pop),
            0b01000111 => Ok(Prn),
            0b01001000 => Ok(Pra),
            0b01010000 => Ok(Call),
            0b01010010 => Ok(Int),
            0b01010100 => Ok(Jmp),
            0b01010101 => Ok(Jeq),
            0b01010110 => Ok(Jne),
            0b01010111 => Ok(Jgt),
            0b01011000 => Ok(Jlt),
            0b01011001 => Ok(Jle),
            0b01011010 => Ok(Jge),
            0b01100101 => Ok(Inc),
            0b01100110 => Ok(Dec),
            0b01101001 => Ok(Not),
            0b10000010 => Ok(Ldi),
            0b10000011 => Ok(Ld),
            0b10000100 => Ok(St),
            0b10100000 => Ok(Add),
            0b10100001 => Ok(Sub),
            0b10100010 => Ok(Mul),
            0b10100011 => Ok(Div),
            0b10100100 => Ok(Mod),
            0b10100111 => Ok(Cmp),
            0b10101000 => Ok(And),
            0b10101010 => Ok(Or),
            0b10101011 => Ok(Xor),
            0b10101100 => Ok(Shl),
            0b10101101 => Ok(Shr),
            _ => Err(Error::IllegalInstruction(byte)),
        }
    }
}

impl Opcode {
    /// Number of operand bytes following the instruction byte. The whole
    /// instruction occupies `1 + operand_count()` memory cells.
    pub fn operand_count(&self) -> u16 {
        use Opcode::*;

        match self {
            Nop | Hlt | Ret | Iret => 0,
            Push | Pop | Prn | Pra | Call | Int | Jmp | Jeq | Jne | Jgt | Jlt
            | Jle | Jge | Inc | Dec | Not => 1,
            Ldi | Ld | St | Add | Sub | Mul | Div | Mod | Cmp | And | Or | Xor
            | Shl | Shr => 2,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;

        match self {
            Nop => "nop",
            Hlt => "hlt",
            Ret => "ret",
            Iret => "iret",
            Push => "push",
            Pop => "pop",
            Prn => "prn",
            Pra => "pra",
            Call => "call",
            Int => "int",
            Jmp => "jmp",
            Jeq => "jeq",
            Jne => "jne",
            Jgt => "jgt",
            Jlt => "jlt",
            Jle => "jle",
            Jge => "jge",
            Inc => "inc",
            Dec => "dec",
            Not => "not",
            Ldi => "ldi",
            Ld => "ld",
            St => "st",
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            Div => "div",
            Mod => "mod",
            Cmp => "cmp",
            And => "and",
            Or => "or",
            Xor => "xor",
            Shl => "shl",
            Shr => "shr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Opcode;
    use crate::errors::Error;
    use std::convert::TryFrom;

    #[test]
    fn test_operand_count_matches_encoding() {
        // the top two bits of every defined opcode byte are its operand count
        for byte in 0..=255u8 {
            if let Ok(opcode) = Opcode::try_from(byte) {
                assert_eq!(opcode.operand_count(), ((byte >> 6) & 0b11) as u16);
            }
        }
    }

    #[test]
    fn test_unknown_byte() {
        assert_eq!(Opcode::try_from(0xFF), Err(Error::IllegalInstruction(0xFF)));
        assert_eq!(Opcode::try_from(0b10101110), Err(Error::IllegalInstruction(0b10101110)));
    }
}
