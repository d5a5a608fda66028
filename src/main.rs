use anycodec::{marshal, marshal_indent, unmarshal, Format, Operation};
use std::env;
use std::fs;
use std::io::Write;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} <input-file> <output-format-or-extension>",
            args[0]
        );
        eprintln!("Example: {} config.flat.yaml json", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let from = Format::from_path(input_path);
    if from == Format::Unknown {
        eprintln!("ERROR: Cannot identify the format of {input_path}");
        std::process::exit(1);
    }

    let to = Format::from_path(&args[2]);
    if to == Format::Unknown {
        eprintln!("ERROR: Unknown output format {:?}", args[2]);
        std::process::exit(1);
    }

    let data = match fs::read(input_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("ERROR: Cannot read {input_path}: {e}");
            std::process::exit(1);
        }
    };

    // Decode to an untyped value so any input shape converts.
    let value: serde_json::Value = match unmarshal(from, &data) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("ERROR: Decoding {input_path} as {from} failed: {e}");
            std::process::exit(1);
        }
    };

    let encoded = if to.supports(Operation::EncodeIndent) {
        marshal_indent(to, &value, "", "  ")
    } else {
        marshal(to, &value)
    };

    match encoded {
        Ok(bytes) => {
            let mut stdout = std::io::stdout();
            if let Err(e) = stdout.write_all(&bytes).and_then(|()| stdout.write_all(b"\n")) {
                eprintln!("ERROR: Writing output failed: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("ERROR: Encoding as {to} failed: {e}");
            std::process::exit(1);
        }
    }
}
