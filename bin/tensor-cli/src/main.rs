// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dtensor
//!
//! Command-line interface for dense-tensor and npy-codec.
//!
//! ## Usage
//! ```bash
//! # Summarize an .npy file
//! dtensor inspect weights.npy --json
//!
//! # Multiply two matrices on a chosen backend
//! dtensor matmul a.npy b.npy -o c.npy --backend portable
//!
//! # Convolve and pool an image
//! dtensor conv2d image.npy filter.npy --strides 1,1,1 -o features.npy
//! dtensor max-pool features.npy --ksize 2,2,1 --strides 2,2,1 -o pooled.npy
//!
//! # Compare matmul backends
//! dtensor bench --sizes 64,128,256 --iterations 5
//! ```

mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::apply::UnaryOp;
use config::CliConfig;
use dense_tensor::MatmulBackend;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dtensor",
    about = "Dense tensor arithmetic and CNN primitives over .npy files",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file; explicit flags take precedence.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print shape, dtype and value statistics of an .npy file.
    Inspect {
        /// The .npy file to read.
        file: PathBuf,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Multiply two rank-2 tensors.
    Matmul {
        /// Left operand, shape [M, K].
        lhs: PathBuf,

        /// Right operand, shape [K, N].
        rhs: PathBuf,

        /// Output .npy file.
        #[arg(short, long)]
        output: PathBuf,

        /// GEMM kernel: portable or accelerated.
        #[arg(short, long)]
        backend: Option<MatmulBackend>,
    },

    /// "Same"-padded 2-D convolution.
    Conv2d {
        /// Input image, [rows, cols, channels] or [batch, rows, cols, channels].
        input: PathBuf,

        /// Filter bank, [rows, cols, in_channels, out_channels].
        filter: PathBuf,

        /// One stride per input axis, comma-separated (e.g. "1,2,2,1").
        #[arg(long, value_delimiter = ',', required = true)]
        strides: Vec<usize>,

        /// Output .npy file.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// "Same"-padded max pooling.
    MaxPool {
        /// Input image, [rows, cols, channels] or [batch, rows, cols, channels].
        input: PathBuf,

        /// One window extent per input axis, comma-separated.
        #[arg(long, value_delimiter = ',', required = true)]
        ksize: Vec<usize>,

        /// One stride per input axis, comma-separated.
        #[arg(long, value_delimiter = ',', required = true)]
        strides: Vec<usize>,

        /// Output .npy file.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Apply an element-wise function or softmax.
    Apply {
        /// Function to apply.
        #[arg(value_enum)]
        op: UnaryOp,

        /// Input .npy file.
        input: PathBuf,

        /// Output .npy file.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Time both matmul backends on square matrices.
    Bench {
        /// Comma-separated matrix sizes (e.g. "64,128,256").
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,

        /// Timed repetitions per size and backend.
        #[arg(long)]
        iterations: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    tracing::debug!("effective configuration:\n{}", config.to_toml()?);

    match cli.command {
        Commands::Inspect { file, json } => commands::inspect::execute(&file, json),
        Commands::Matmul {
            lhs,
            rhs,
            output,
            backend,
        } => commands::matmul::execute(&lhs, &rhs, &output, backend.unwrap_or(config.backend)),
        Commands::Conv2d {
            input,
            filter,
            strides,
            output,
        } => commands::conv2d::execute(&input, &filter, &strides, &output),
        Commands::MaxPool {
            input,
            ksize,
            strides,
            output,
        } => commands::max_pool::execute(&input, &ksize, &strides, &output),
        Commands::Apply { op, input, output } => commands::apply::execute(op, &input, &output),
        Commands::Bench { sizes, iterations } => {
            let mut bench = config.bench;
            if let Some(sizes) = sizes {
                bench.sizes = sizes;
            }
            if let Some(iterations) = iterations {
                bench.iterations = iterations;
            }
            commands::bench::execute(&bench)
        }
    }
}
