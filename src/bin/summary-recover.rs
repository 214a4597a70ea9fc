use std::env;
use std::io::{self, Read};

fn main() {
    let mut input_path: Option<String> = None;
    let mut with_report = false;

    let args = env::args().skip(1).collect::<Vec<_>>();
    let mut i = 0;
    while i < args.len() {
        let a = &args[i];
        match a.as_str() {
            "--input" | "-i" => {
                i += 1;
                input_path = Some(args.get(i).expect("missing --input value").to_string());
            }
            "--report" => with_report = true,
            "--help" | "-h" => {
                eprintln!(
                    "Usage: summary-recover [--input FILE|-] [--report]\n\
                     Reads stdin if no --input.\n\
                     Prints the recovered record as JSON; --report includes the\n\
                     strategy trace. Set RUST_LOG for per-attempt logging."
                );
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown arg: {a}");
                std::process::exit(2);
            }
        }
        i += 1;
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut buf: Vec<u8> = Vec::new();
    match input_path.as_deref() {
        Some(p) if p != "-" => {
            buf = std::fs::read(p).unwrap_or_else(|e| panic!("failed to read {p}: {e}"));
        }
        _ => {
            io::stdin().read_to_end(&mut buf).expect("stdin read failed");
        }
    }
    let text = String::from_utf8_lossy(&buf);

    let out = if with_report {
        let report = summary_recovery::recover_with_report(&text);
        serde_json::to_string_pretty(&report).expect("report serialization failed")
    } else {
        let record = summary_recovery::recover(&text);
        serde_json::to_string_pretty(&record).expect("record serialization failed")
    };
    println!("{out}");
}
