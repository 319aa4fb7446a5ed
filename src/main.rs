mod cli;

use std::fs::File;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use emu::{I8086, hex, signed_multiply, unsigned_multiply};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Mode};

fn main() -> ExitCode {
    let args = Args::parse();

    // Keeps the log writer thread alive until we return.
    let _guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match read_token(args.token.as_deref()).and_then(|token| run(&args, &token)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Args) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// The token from the command line, or the first whitespace-separated word
/// on stdin.
fn read_token(arg: Option<&str>) -> Result<String> {
    if let Some(token) = arg {
        return Ok(token.to_owned());
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("cannot read stdin")?;

    match input.split_whitespace().next() {
        Some(token) => Ok(token.to_owned()),
        None => bail!("no input token given"),
    }
}

fn run(args: &Args, token: &str) -> Result<String> {
    match args.mode {
        Mode::Interpret => interpret(token, args.registers, args.json),
        Mode::Signed => {
            let (a, b) = hex::unpack_operands(token)?;
            info!("signed {a:#06x} * {b:#06x}");
            Ok(signed_multiply(a, b).to_string())
        }
        Mode::Unsigned => {
            let (a, b) = hex::unpack_operands(token)?;
            info!("unsigned {a:#06x} * {b:#06x}");
            Ok(unsigned_multiply(a, b).to_string())
        }
    }
}

fn interpret(token: &str, dump_registers: bool, json: bool) -> Result<String> {
    let program = hex::parse_program(token)?;
    info!("interpreting {} byte(s)", program.len());

    let mut cpu = I8086::new();
    let product = cpu.run(&program)?;
    info!("{} instruction(s) executed", cpu.executed());

    let mut output = format!("DX:{:04X} AX:{:04X}", product.high, product.low);

    if dump_registers {
        output.push('\n');
        if json {
            let registers: serde_json::Map<String, serde_json::Value> = cpu
                .registers
                .iter()
                .map(|(reg, value)| (reg.to_string().to_uppercase(), value.into()))
                .collect();
            output.push_str(&serde_json::to_string(&registers)?);
        } else {
            output.push_str(&cpu.registers.to_string());
        }
    }

    Ok(output)
}
