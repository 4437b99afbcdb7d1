use crate::constants::{EQUAL_BIT, GREATER_BIT, LESS_BIT, NUM_REG, SP, SP_INIT, TOM};
use crate::errors::Error;
use crate::opcode::Opcode;
use crate::output::OutputSink;
use crate::utils::{get_bit, set_bit};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Result of executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    Halted,
}

/// The whole LS-8 interpreter state: 256 bytes of memory, 8 general-purpose
/// registers (R7 is the stack pointer), a program counter and a flags register.
#[derive(Debug, Serialize, Deserialize)]
pub struct Machine {
    pub mem: Vec<u8>,
    pub registers: [u8; NUM_REG],
    pub pc: u16,
    pub fl: u8,
    halted: bool,
}

impl Machine {
    pub fn new() -> Machine {
        let mut registers = [0u8; NUM_REG];
        registers[SP] = SP_INIT;

        Machine {
            mem: vec![0; TOM as usize],
            registers,
            pc: 0,
            fl: 0,
            halted: false,
        }
    }

    /// Copy a program into memory starting at address 0. The loader that
    /// produced the bytes has no further claim on them.
    pub fn load(&mut self, program:&[u8]) -> Result<(), Error> {
        if program.len() > self.mem.len() {
            return Err(Error::OutOfBounds((program.len() - 1) as u16));
        }
        self.mem[..program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn ram_read(&self, address:u16) -> Result<u8, Error> {
        if address < TOM {
            Ok(self.mem[address as usize])
        } else {
            Err(Error::OutOfBounds(address))
        }
    }

    pub fn ram_write(&mut self, address:u16, value:u8) -> Result<(), Error> {
        if address < TOM {
            self.mem[address as usize] = value;
            Ok(())
        } else {
            Err(Error::OutOfBounds(address))
        }
    }

    pub fn reg_read(&self, index:u8) -> Result<u8, Error> {
        if (index as usize) < NUM_REG {
            Ok(self.registers[index as usize])
        } else {
            Err(Error::InvalidRegister(index))
        }
    }

    pub fn reg_write(&mut self, index:u8, value:u8) -> Result<(), Error> {
        if (index as usize) < NUM_REG {
            self.registers[index as usize] = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister(index))
        }
    }

    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Fetch, decode and execute one instruction. The PC is advanced past the
    /// whole instruction before dispatch, so control-flow handlers overwrite it
    /// with their target outright rather than adjusting it.
    pub fn step(&mut self, out:&mut dyn OutputSink) -> Result<StepOutcome, Error> {
        if self.halted {
            return Ok(StepOutcome::Halted);
        }

        let ir = self.ram_read(self.pc)?;
        let width = 1 + ((ir >> 6) & 0b11) as u16;
        let opcode = match Opcode::try_from(ir) {
            Ok(opcode) => opcode,
            Err(e) => {
                // skip the unrecognized instruction's encoded width, then fault
                self.pc += width;
                return Err(e);
            }
        };

        let mut operands = [0u8; 2];
        for n in 0..opcode.operand_count() {
            operands[n as usize] = self.ram_read(self.pc + 1 + n)?;
        }

        self.pc += width;
        self.execute(opcode, operands[0], operands[1], out)?;

        if self.halted {
            Ok(StepOutcome::Halted)
        } else {
            Ok(StepOutcome::Running)
        }
    }

    /// Run until HLT or a fault. HLT is a loop exit, not a process exit, so the
    /// caller can still inspect the final state.
    pub fn run(&mut self, out:&mut dyn OutputSink) -> Result<(), Error> {
        while let StepOutcome::Running = self.step(out)? {}
        Ok(())
    }

    fn execute(&mut self, opcode:Opcode, a:u8, b:u8, out:&mut dyn OutputSink) -> Result<(), Error> {
        match opcode {
            Opcode::Ldi => self.reg_write(a, b)?,
            Opcode::Prn => out.print_value(self.reg_read(a)?),
            Opcode::Pra => out.print_char(self.reg_read(a)? as char),

            Opcode::Add => {
                let v = self.reg_read(a)?.wrapping_add(self.reg_read(b)?);
                self.reg_write(a, v)?;
            }
            Opcode::Sub => {
                let v = self.reg_read(a)?.wrapping_sub(self.reg_read(b)?);
                self.reg_write(a, v)?;
            }
            Opcode::Mul => {
                let v = self.reg_read(a)?.wrapping_mul(self.reg_read(b)?);
                self.reg_write(a, v)?;
            }
            Opcode::Div => {
                let divisor = self.reg_read(b)?;
                if divisor == 0 {
                    return Err(Error::DivisionByZero);
                }
                let v = self.reg_read(a)? / divisor;
                self.reg_write(a, v)?;
            }
            Opcode::Mod => {
                let divisor = self.reg_read(b)?;
                if divisor == 0 {
                    return Err(Error::DivisionByZero);
                }
                let v = self.reg_read(a)? % divisor;
                self.reg_write(a, v)?;
            }
            Opcode::Inc => {
                let v = self.reg_read(a)?.wrapping_add(1);
                self.reg_write(a, v)?;
            }
            Opcode::Dec => {
                let v = self.reg_read(a)?.wrapping_sub(1);
                self.reg_write(a, v)?;
            }
            Opcode::And => {
                let v = self.reg_read(a)? & self.reg_read(b)?;
                self.reg_write(a, v)?;
            }
            Opcode::Or => {
                let v = self.reg_read(a)? | self.reg_read(b)?;
                self.reg_write(a, v)?;
            }
            Opcode::Xor => {
                let v = self.reg_read(a)? ^ self.reg_read(b)?;
                self.reg_write(a, v)?;
            }
            Opcode::Not => {
                let v = !self.reg_read(a)?;
                self.reg_write(a, v)?;
            }
            Opcode::Shl => {
                // shifting by 8 or more drains every bit out
                let v = self.reg_read(a)?.checked_shl(self.reg_read(b)? as u32).unwrap_or(0);
                self.reg_write(a, v)?;
            }
            Opcode::Shr => {
                let v = self.reg_read(a)?.checked_shr(self.reg_read(b)? as u32).unwrap_or(0);
                self.reg_write(a, v)?;
            }

            Opcode::Cmp => {
                let x = self.reg_read(a)?;
                let y = self.reg_read(b)?;
                self.fl = 0;
                if x == y {
                    set_bit(&mut self.fl, EQUAL_BIT);
                } else if x < y {
                    set_bit(&mut self.fl, LESS_BIT);
                } else {
                    set_bit(&mut self.fl, GREATER_BIT);
                }
            }

            Opcode::Push => {
                let v = self.reg_read(a)?;
                self.push(v)?;
            }
            Opcode::Pop => {
                let v = self.pop()?;
                self.reg_write(a, v)?;
            }

            Opcode::Call => {
                // self.pc is already past the CALL, i.e. the return address
                if self.pc >= TOM {
                    return Err(Error::OutOfBounds(self.pc));
                }
                let return_to = self.pc as u8;
                self.push(return_to)?;
                self.pc = self.reg_read(a)? as u16;
            }
            Opcode::Ret => {
                self.pc = self.pop()? as u16;
            }

            Opcode::Jmp => self.pc = self.reg_read(a)? as u16,
            Opcode::Jeq => {
                let target = self.reg_read(a)? as u16;
                if get_bit(&self.fl, EQUAL_BIT) {
                    self.pc = target;
                }
            }
            Opcode::Jne => {
                let target = self.reg_read(a)? as u16;
                if !get_bit(&self.fl, EQUAL_BIT) {
                    self.pc = target;
                }
            }
            Opcode::Jgt => {
                let target = self.reg_read(a)? as u16;
                if get_bit(&self.fl, GREATER_BIT) {
                    self.pc = target;
                }
            }
            Opcode::Jlt => {
                let target = self.reg_read(a)? as u16;
                if get_bit(&self.fl, LESS_BIT) {
                    self.pc = target;
                }
            }
            Opcode::Jge => {
                let target = self.reg_read(a)? as u16;
                if get_bit(&self.fl, EQUAL_BIT) || get_bit(&self.fl, GREATER_BIT) {
                    self.pc = target;
                }
            }
            Opcode::Jle => {
                let target = self.reg_read(a)? as u16;
                if get_bit(&self.fl, EQUAL_BIT) || get_bit(&self.fl, LESS_BIT) {
                    self.pc = target;
                }
            }

            Opcode::St => {
                let address = self.reg_read(a)? as u16;
                let v = self.reg_read(b)?;
                self.ram_write(address, v)?;
            }
            Opcode::Ld => {
                let address = self.reg_read(b)? as u16;
                let v = self.ram_read(address)?;
                self.reg_write(a, v)?;
            }

            Opcode::Nop => {}
            Opcode::Int | Opcode::Iret => {} // interrupts not wired up
            Opcode::Hlt => self.halt(),
        }

        Ok(())
    }

    fn push(&mut self, value:u8) -> Result<(), Error> {
        let sp = self.registers[SP];
        if sp == 0 {
            return Err(Error::StackOverflow);
        }
        self.ram_write((sp - 1) as u16, value)?;
        self.registers[SP] = sp - 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<u8, Error> {
        let sp = self.registers[SP];
        if sp as u16 == TOM - 1 {
            return Err(Error::StackUnderflow);
        }
        let value = self.ram_read(sp as u16)?;
        self.registers[SP] = sp + 1;
        Ok(value)
    }
}
