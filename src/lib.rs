pub mod constants;
pub mod errors;
pub mod loader;
pub mod machine;
pub mod monitor;
pub mod opcode;
pub mod output;
pub mod utils;


pub use crate::errors::Error;
pub use crate::machine::{Machine, StepOutcome};
pub use crate::opcode::Opcode;
pub use crate::output::{CapturedOutput, OutputSink, StdoutSink};
