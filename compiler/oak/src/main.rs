//! Oak CLI

use oak::commands::{eval_expression, run_file};

fn main() {
    oak::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let code = match args[1].as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: oak run <file.oak>");
                std::process::exit(1);
            };
            run_file(path)
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: oak eval <expression>");
                std::process::exit(1);
            }
            // Remaining arguments form one snippet, so quoting is optional.
            eval_expression(&args[2..].join(" "))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("oak {}", env!("CARGO_PKG_VERSION"));
            0
        }
        // `oak script.oak` is shorthand for `oak run script.oak`.
        path if std::path::Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("oak")) =>
        {
            run_file(path)
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            1
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!("Oak language runtime");
    println!();
    println!("Usage: oak <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>         Run an Oak program");
    println!("  eval <expression>  Evaluate a snippet and print its value");
    println!("  help               Show this message");
    println!("  version            Show version information");
    println!();
    println!("Environment:");
    println!("  OAK_MAX_CALL_DEPTH  Maximum non-tail call depth (default 10000)");
    println!("  OAK_GC_THRESHOLD    Allocations between collections (default 50000)");
    println!("  RUST_LOG            Enable tracing output, e.g. oak_eval=debug");
}
