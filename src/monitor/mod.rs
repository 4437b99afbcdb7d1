use crate::constants::{NUM_REG, TOM};
use crate::machine::{Machine, StepOutcome};
use crate::opcode::Opcode;
use crate::output::StdoutSink;
use std::convert::TryFrom;
use std::fs;
use std::io::{self, BufRead, Write};

const STATE_FILE:&str = "state0.json";

/// Interactive debug monitor. Every command runs strictly between
/// instructions; nothing here touches machine state mid-dispatch.
pub fn run_monitor(m0:&mut Machine) {
    let stdin = io::stdin();
    let mut trace_enabled = false;

    println!("LS-8 monitor. g=run n=step r=regs d=disassemble x=examine w=write s=save l=load t=trace q=quit");

    loop {
        print!("ls8> ");
        let _ = io::stdout().flush();

        let mut buffer = String::new();
        match stdin.lock().read_line(&mut buffer) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }
        let tokens:Vec<&str> = buffer.split_whitespace().collect();

        match tokens.first() {
            Some(&"g") => run_until_halt(m0, trace_enabled),
            Some(&"n") => step_once(m0, trace_enabled),
            Some(&"r") => print_regs(m0),
            Some(&"d") => disassemble(m0, &tokens),
            Some(&"x") => examine_memory(m0, &tokens),
            Some(&"w") => write_memory(m0, &tokens),
            Some(&"s") => save_state(m0),
            Some(&"l") => load_state(m0),
            Some(&"t") => trace_enabled = toggle_trace(trace_enabled),
            Some(&"q") => break,
            Some(other) => println!("unknown command: {}", other),
            None => {}
        }
    }
}

fn run_until_halt(m0:&mut Machine, trace_enabled:bool) {
    let mut out = StdoutSink;
    loop {
        if trace_enabled {
            trace(m0);
        }
        match m0.step(&mut out) {
            Ok(StepOutcome::Running) => {}
            Ok(StepOutcome::Halted) => {
                println!("halted");
                break;
            }
            Err(e) => {
                println!("fault: {}", e);
                break;
            }
        }
    }
}

fn step_once(m0:&mut Machine, trace_enabled:bool) {
    if trace_enabled {
        trace(m0);
    }
    let mut out = StdoutSink;
    match m0.step(&mut out) {
        Ok(StepOutcome::Running) => {}
        Ok(StepOutcome::Halted) => println!("halted"),
        Err(e) => println!("fault: {}", e),
    }
}

/// One-line snapshot of the machine, taken between instructions.
pub fn trace(m0:&Machine) {
    print!("TRACE: {:02X} |", m0.pc);
    for n in 0..3 {
        match m0.ram_read(m0.pc + n) {
            Ok(byte) => print!(" {:02X}", byte),
            Err(_) => print!(" --"),
        }
    }
    print!(" |");
    for n in 0..NUM_REG {
        print!(" {:02X}", m0.registers[n]);
    }
    println!();
}

pub fn print_regs(m0:&Machine) {
    for n in 0..NUM_REG {
        println!("R{}: {:#04X}", n, m0.registers[n]);
    }
    println!("PC: {:#04X}  FL: {:#010b}", m0.pc, m0.fl);
}

fn parse_hex_u16(token:&str) -> Option<u16> {
    u16::from_str_radix(token, 16).ok()
}

pub fn write_memory(m0:&mut Machine, tokens:&[&str]) {
    let (loc, val) = match (tokens.get(1), tokens.get(2)) {
        (Some(l), Some(v)) => (parse_hex_u16(l), parse_hex_u16(v)),
        _ => (None, None),
    };

    match (loc, val) {
        (Some(loc), Some(val)) if val <= 0xFF => {
            if let Err(e) = m0.ram_write(loc, val as u8) {
                println!("{}", e);
            }
        }
        _ => println!("Usage: w NN v
        NN - memory location in HEX
        v - value in HEX"),
    }
}

pub fn examine_memory(m0:&Machine, tokens:&[&str]) {
    match tokens.get(1).and_then(|t| parse_hex_u16(t)) {
        Some(loc) => match m0.ram_read(loc) {
            Ok(byte) => println!("{:#04X}: {:#04X}", loc, byte),
            Err(e) => println!("{}", e),
        },
        None => println!("Usage: x NN
        NN - memory location in HEX"),
    }
}

pub fn disassemble(m0:&Machine, tokens:&[&str]) {
    let (start, end) = match (tokens.get(1), tokens.get(2)) {
        (Some(s), Some(e)) => (parse_hex_u16(s), parse_hex_u16(e)),
        _ => (None, None),
    };

    match (start, end) {
        (Some(start), Some(end)) if start <= end && end < TOM => {
            disassemble_range(m0, start, end);
        }
        _ => println!("Usage: d SS EE
        SS - starting address in HEX
        EE - ending address in HEX"),
    }
}

pub fn disassemble_range(m0:&Machine, start:u16, end:u16) {
    let mut addr = start;
    while addr <= end {
        let byte = match m0.ram_read(addr) {
            Ok(byte) => byte,
            Err(_) => break,
        };
        match Opcode::try_from(byte) {
            Ok(opcode) => {
                print!("{:#04X}:\t{}", addr, opcode.mnemonic());
                for n in 0..opcode.operand_count() {
                    match m0.ram_read(addr + 1 + n) {
                        Ok(operand) => print!("\t{:#04X}", operand),
                        Err(_) => print!("\t--"),
                    }
                }
                println!();
                addr += 1 + opcode.operand_count();
            }
            Err(_) => {
                println!("{:#04X}:\t??? ({:#04X})", addr, byte);
                addr += 1;
            }
        }
    }
}

pub fn save_state(m0:&Machine) {
    let serialized = match serde_json::to_string(m0) {
        Ok(s) => s,
        Err(e) => {
            println!("failed to serialize state: {}", e);
            return;
        }
    };
    match fs::write(STATE_FILE, serialized) {
        Ok(()) => println!("state saved to {}", STATE_FILE),
        Err(e) => println!("failed to write {}: {}", STATE_FILE, e),
    }
}

pub fn load_state(m0:&mut Machine) {
    let source = match fs::read_to_string(STATE_FILE) {
        Ok(s) => s,
        Err(e) => {
            println!("failed to read {}: {}", STATE_FILE, e);
            return;
        }
    };
    match serde_json::from_str::<Machine>(&source) {
        Ok(deserialized) => {
            *m0 = deserialized;
            println!("state loaded from {}", STATE_FILE);
        }
        Err(e) => println!("failed to parse {}: {}", STATE_FILE, e),
    }
}

pub fn toggle_trace(trace_enabled:bool) -> bool {
    print!("toggling trace output ");
    if !trace_enabled {
        println!("on");
    } else {
        println!("off");
    }
    !trace_enabled
}
