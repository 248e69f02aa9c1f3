use huffpack::compression::{compress_file, decompress_file};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "usage: huffpack <compress|decompress> <input> <output>";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let (mode, input, output) = match args.as_slice() {
        [mode, input, output] => (mode.as_str(), input, output),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let result = match mode {
        "compress" => compress_file(input, output),
        "decompress" => decompress_file(input, output),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(symbols) => {
            println!("{mode}ed {symbols} bytes: {input} -> {output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.is_incomplete_output() {
                eprintln!("{output} is incomplete");
            }
            eprintln!("{mode} failed: {e}");
            ExitCode::FAILURE
        }
    }
}
