use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use appendio::config::parse_octal_mode;
use appendio::{Encoding, OpenFlag, Payload, WriteOptions, append_file_blocking};

fn print_usage_and_exit() -> ! {
    eprintln!("Usage:");
    eprintln!("  append_file [options] <path> <text>");
    eprintln!("  append_file [options] --bytes-from <file> <path>");
    eprintln!("  append_file [options] --number <n> <path>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --mode <octal>       Mode for a newly created file (default 666)");
    eprintln!("  --encoding <name>    Encoding of <text> (default utf8)");
    eprintln!("  --flag <flag>        Open flag (default a)");
    eprintln!("  --flush              Sync data to disk before exiting");
    eprintln!("  --options <file>     Load options from a JSON or YAML file");
    std::process::exit(1);
}

fn load_options(path: &str) -> Result<WriteOptions, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let is_yaml = matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );

    if is_yaml {
        #[cfg(feature = "yaml")]
        return Ok(WriteOptions::from_yaml_str(&text)?);
        #[cfg(not(feature = "yaml"))]
        return Err("YAML option files require the `yaml` feature".into());
    }

    Ok(WriteOptions::from_json_str(&text)?)
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);

    let mut options = WriteOptions::default();
    let mut mode = None;
    let mut encoding = None;
    let mut flag = None;
    let mut flush = false;
    let mut payload = None;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        let mut value_for = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{name} requires a value"))
        };

        match arg.as_str() {
            "--mode" => mode = Some(parse_octal_mode(&value_for("--mode")?)?),
            "--encoding" => encoding = Some(value_for("--encoding")?.parse::<Encoding>()?),
            "--flag" => flag = Some(value_for("--flag")?.parse::<OpenFlag>()?),
            "--flush" => flush = true,
            "--options" => options = load_options(&value_for("--options")?)?,
            "--bytes-from" => payload = Some(Payload::Bytes(fs::read(value_for("--bytes-from")?)?)),
            "--number" => {
                let n: f64 = value_for("--number")?.parse()?;
                payload = Some(Payload::numeric(n)?);
            }
            "-h" | "--help" => print_usage_and_exit(),
            _ => positional.push(arg),
        }
    }

    if let Some(mode) = mode {
        options = options.with_mode(mode);
    }
    if let Some(encoding) = encoding {
        options = options.with_encoding(encoding);
    }
    if let Some(flag) = flag {
        options = options.with_flag(flag);
    }
    if flush {
        options = options.with_flush(true);
    }

    let mut positional = positional.into_iter();
    let path = positional.next().ok_or("missing path argument")?;
    let payload = match (payload, positional.next()) {
        (Some(payload), None) => payload,
        (None, Some(text)) => Payload::Text(text),
        (Some(_), Some(_)) => return Err("text given together with --bytes-from/--number".into()),
        (None, None) => return Err("missing data argument".into()),
    };
    if positional.next().is_some() {
        return Err("too many arguments".into());
    }

    tracing::debug!(%path, kind = payload.kind(), ?options, "appending");
    append_file_blocking(path.as_str(), payload, options)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("append_file error: {e}");
        std::process::exit(1);
    }
}
