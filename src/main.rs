//! lanevm — driver for the simulated masked vector unit

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::process;

use cli::{Cli, Kernel};
use lanevm::kernels::{abs_scalar, abs_vector, clamped_exp_scalar, clamped_exp_vector};
use lanevm::trace::{ExecTrace, TraceSummary};
use lanevm::{VectorUnit, Workload};

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut workload =
        Workload::generate(cli.size, cli.seed).context("invalid workload configuration")?;

    // Scalar oracle into gold, vector kernel into output. No shared state
    // between the two paths.
    let mut unit = VectorUnit::new();
    match cli.kernel {
        Kernel::ClampedExp => {
            clamped_exp_scalar(
                &workload.values,
                &workload.exponents,
                &mut workload.gold,
                workload.n,
            );
            clamped_exp_vector(
                &mut unit,
                &workload.values,
                &workload.exponents,
                &mut workload.output,
                workload.n,
            );
        }
        Kernel::Abs => {
            abs_scalar(&workload.values, &mut workload.gold, workload.n);
            abs_vector(&mut unit, &workload.values, &mut workload.output, workload.n);
        }
    }

    let verdict = workload.verify();

    if !cli.quiet {
        if cli.log {
            print_log(unit.trace());
        }
        print_summary(&unit.trace().summary());
    }

    println!("{:*^72}", " Result Verification ");
    match verdict {
        Ok(()) => println!("{}", "Passed".green().bold()),
        Err(err) => {
            println!("{}", "Failed".red().bold());
            println!("{err}");
            dump_arrays(&workload);
        }
    }

    Ok(())
}

/// Print every recorded masked instruction with its mask and active count.
fn print_log(trace: &ExecTrace) {
    println!("{:*^72}", " Vector Unit Execution Log ");
    for (i, entry) in trace.entries().iter().enumerate() {
        println!("{i:4}: {entry}");
    }
}

/// Print the aggregate utilization report.
fn print_summary(summary: &TraceSummary) {
    println!("{:*^72}", " Vector Unit Statistics ");
    println!("  Instructions issued: {}", summary.instructions);
    println!("  Lane slots issued:   {}", summary.lane_slots);
    println!("  Lanes active:        {}", summary.lanes_active);
    println!("  Utilization:         {:.1}%", summary.utilization_percent);
    println!("  Per-opcode breakdown:");
    for stats in &summary.per_opcode {
        println!(
            "    {:<11} {:>6} instr {:>8} lanes",
            stats.opcode.mnemonic(),
            stats.instructions,
            stats.lanes_active
        );
    }
}

/// Dump the live region of all four arrays for diagnosis.
fn dump_arrays(workload: &Workload) {
    let n = workload.n;

    print!("value  = ");
    for v in &workload.values[..n] {
        print!("{v:>10.6} ");
    }
    println!();

    print!("exp    = ");
    for e in &workload.exponents[..n] {
        print!("{e:>10} ");
    }
    println!();

    print!("output = ");
    for v in &workload.output[..n] {
        print!("{v:>10.6} ");
    }
    println!();

    print!("gold   = ");
    for v in &workload.gold[..n] {
        print!("{v:>10.6} ");
    }
    println!();
}
