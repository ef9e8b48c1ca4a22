//! # Thinwall CLI Application
//!
//! Terminal front-end for the section analysis engine.
//!
//! ## Usage
//!
//! ```text
//! thinwall_cli cases                    List the worked cases
//! thinwall_cli case <n> [--json]        Run worked case n
//! thinwall_cli run <study.json> [--json] Analyze a study file
//! thinwall_cli equations                Print the equations reference
//! ```
//!
//! Set `RUST_LOG=debug` to see intermediate quantities.

use std::env;
use std::path::Path;
use std::process;

use serde::Serialize;

use thinwall_core::calculations::analysis::{analyze_study, StudyInput, StudyReport};
use thinwall_core::equations::generate_equations_markdown;
use thinwall_core::report::{render_lines, ToReport};
use thinwall_core::worked_cases::{self, WorkedCase};
use thinwall_core::{AnalysisError, AnalysisResult};

const RULE: &str = "═══════════════════════════════════════";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&str> = args.iter().filter(|a| !a.starts_with("--")).map(String::as_str).collect();

    let outcome = match positional.as_slice() {
        ["cases"] => {
            list_cases();
            Ok(())
        }
        ["case", number] => run_case(number, json),
        ["run", path] => run_study(Path::new(path), json),
        ["equations"] => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
        _ => {
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Thinwall CLI - Thin-Walled Composite Section Analysis");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  thinwall_cli cases                     List the worked cases");
    eprintln!("  thinwall_cli case <n> [--json]         Run worked case n");
    eprintln!("  thinwall_cli run <study.json> [--json] Analyze a study file");
    eprintln!("  thinwall_cli equations                 Print the equations reference");
}

fn list_cases() {
    println!("Worked cases:");
    for (number, title) in worked_cases::titles() {
        println!("  {}. {}", number, title);
    }
}

fn run_case(number: &str, json: bool) -> AnalysisResult<()> {
    let number: usize = number
        .parse()
        .map_err(|_| AnalysisError::invalid_input("case", number, "Case number must be an integer"))?;
    let case = worked_cases::run(number)?;
    if json {
        print_json(&case)
    } else {
        print_case(&case);
        Ok(())
    }
}

fn run_study(path: &Path, json: bool) -> AnalysisResult<()> {
    let study = StudyInput::load(path)?;
    let report = analyze_study(&study)?;
    if json {
        print_json(&report)
    } else {
        print_study(&report);
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> AnalysisResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_case(case: &WorkedCase) {
    println!("{}", RULE);
    println!("  CASE {}: {}", case.number, case.title.to_uppercase());
    println!("{}", RULE);
    println!();
    print!("{}", render_lines(&case.lines));
    println!();
    print!("{}", case.equations.to_markdown());
}

fn print_study(report: &StudyReport) {
    println!("{}", RULE);
    println!("  STUDY: {}", report.label);
    println!("{}", RULE);
    println!();
    println!("Topology: {:?}", report.topology);
    println!();
    print!("{}", render_lines(&report.report_lines()));
    println!();
    print!("{}", report.equations.to_markdown());
}
