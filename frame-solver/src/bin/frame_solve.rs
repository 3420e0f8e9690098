//! Frame Solver command line - solve a parameter file or the example frame
//!
//! ```text
//! frame-solve [PARAMS.json] [--fixed-fixed] [--precision N] [--save PATH] [--json]
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;

use frame_solver::prelude::*;

const USAGE: &str =
    "usage: frame-solve [PARAMS.json] [--fixed-fixed] [--precision N] [--save PATH] [--json]";

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    save: Option<PathBuf>,
    precision: Option<usize>,
    fixed_fixed: bool,
    json: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--fixed-fixed" => args.fixed_fixed = true,
            "--json" => args.json = true,
            "--precision" => {
                let digits = iter.next().context("--precision needs a digit count")?;
                let digits = digits
                    .parse()
                    .with_context(|| format!("invalid precision '{digits}'"))?;
                args.precision = Some(digits);
            }
            "--save" => {
                let path = iter.next().context("--save needs a file name")?;
                args.save = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => bail!("unknown option '{flag}'\n{USAGE}"),
            path => {
                if args.input.is_some() {
                    bail!("more than one parameter file given\n{USAGE}");
                }
                args.input = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Some(args))
}

fn print_help() {
    println!("{USAGE}");
    println!();
    println!("Parameter file keys:");
    for name in ParameterName::ALL {
        println!("  {:<3} {} [{}]", name.key(), name.description(), name.unit());
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(args) = parse_args()? else {
        print_help();
        return Ok(());
    };

    let supports = if args.fixed_fixed {
        SupportCondition::FixedFixed
    } else {
        SupportCondition::FixedPinned
    };
    let mut model = FrameModel::with_parameters(FrameParameters::reference())
        .with_options(AnalysisOptions::default().with_supports(supports));

    match &args.input {
        Some(path) => model
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?,
        None => info!("no parameter file given, solving the example frame"),
    }

    model.solve().context("frame analysis failed")?;

    if args.json {
        let solution = model.solution().context("no solution")?;
        println!("{}", serde_json::to_string_pretty(solution)?);
    } else {
        {
            let mut sink = TextSink::new(io::stdout().lock());
            if let Some(precision) = args.precision {
                sink = sink.with_precision(precision);
            }
            model.report(&mut sink)?;
        }

        if let Some(solution) = model.solution() {
            let summary = solution.summary();
            println!();
            println!(
                "Max translation: {:.4e} at node {}",
                summary.max_displacement, summary.max_disp_node
            );
            println!("Max |M|: {:.4e}", summary.max_moment);
            println!("Free DOFs: {} of {}", summary.free_dofs, summary.total_dofs);
        }
    }

    if let Some(path) = &args.save {
        model
            .save_as(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }

    Ok(())
}
