use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Decode and run TOKEN as machine code, report DX:AX.
    #[default]
    Interpret,
    /// Multiply two packed little-endian 16-bit operands, signed.
    Signed,
    /// Multiply two packed little-endian 16-bit operands, unsigned.
    Unsigned,
}

#[derive(Parser, Debug)]
#[command(name = "imul16")]
#[command(about = "Runs xor/mov/imul 16-bit x86 machine code with a software multiply", long_about = None)]
pub struct Args {
    /// Hex token; read from stdin when missing
    pub token: Option<String>,

    #[arg(long, value_enum, default_value_t = Mode::Interpret)]
    pub mode: Mode,

    /// Print all eight registers after interpretation
    #[arg(long, action = ArgAction::SetTrue)]
    pub registers: bool,

    /// Print the register dump as JSON (with --registers)
    #[arg(long, action = ArgAction::SetTrue, requires = "registers")]
    pub json: bool,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["imul16", "31d2"]).unwrap();
        assert_eq!(args.token.as_deref(), Some("31d2"));
        assert_eq!(args.mode, Mode::Interpret);
        assert!(!args.registers);
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn token_is_optional() {
        let args = Args::try_parse_from(["imul16", "--mode", "signed"]).unwrap();
        assert_eq!(args.token, None);
        assert_eq!(args.mode, Mode::Signed);
    }

    #[test]
    fn verbosity_counts() {
        let args = Args::try_parse_from(["imul16", "-vv"]).unwrap();
        assert_eq!(args.log_level(), "debug");

        let args = Args::try_parse_from(["imul16", "-vvvv"]).unwrap();
        assert_eq!(args.log_level(), "trace");
    }

    #[test]
    fn json_needs_registers() {
        assert!(Args::try_parse_from(["imul16", "--json", "31d2"]).is_err());
        assert!(Args::try_parse_from(["imul16", "--registers", "--json", "31d2"]).is_ok());
    }
}
