//! Command-line argument parsing for the lanevm driver

use clap::{Parser, ValueEnum};

/// Simulated masked vector unit — verify a hand-vectorized kernel against
/// its scalar oracle and report lane utilization.
#[derive(Parser, Debug)]
#[command(name = "lanevm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workload size
    #[arg(short = 's', long, default_value_t = 16, value_name = "N")]
    pub size: usize,

    /// Print the vector unit execution log
    #[arg(short = 'l', long)]
    pub log: bool,

    /// Workload kernel
    #[arg(short = 'k', long, value_enum, default_value = "clamped-exp")]
    pub kernel: Kernel,

    /// PRNG seed for workload generation
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the verification verdict
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// Clamped exponentiation (divergent per-lane trip counts)
    ClampedExp,
    /// Absolute value (if/else masking, no divergence)
    Abs,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt().with_env_filter(filter).with_target(false).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::parse_from(["lanevm"]);
        assert_eq!(cli.size, 16);
        assert_eq!(cli.seed, 0);
        assert!(!cli.log);
        assert!(matches!(cli.kernel, Kernel::ClampedExp));
    }

    #[test]
    fn test_cli_parsing_with_options() {
        let cli = Cli::parse_from([
            "lanevm", "-s", "100", "--log", "-k", "abs", "--seed", "9", "-vv",
        ]);
        assert_eq!(cli.size, 100);
        assert_eq!(cli.seed, 9);
        assert!(cli.log);
        assert!(matches!(cli.kernel, Kernel::Abs));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_negative_size() {
        assert!(Cli::try_parse_from(["lanevm", "-s", "-4"]).is_err());
    }
}
