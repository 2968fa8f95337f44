//! Decode a hex buffer against one struct of a template file and print the
//! word table plus the decoded rows.

use anyhow::Context;
use bitscope::word::word_hex;
use bitscope::{template, OffsetRange, Session};

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let strict = if let Some(pos) = args.iter().position(|a| a == "--strict" || a == "-s") {
        args.remove(pos);
        true
    } else {
        false
    };
    if args.len() != 3 {
        eprintln!("usage: inspect [--strict] <template-file> <struct> <hex-buffer>");
        std::process::exit(2);
    }
    let (path, struct_name, hex) = (&args[0], &args[1], &args[2]);

    let tpl = if strict {
        template::load(path).with_context(|| format!("loading template {}", path))?
    } else {
        let (tpl, warnings) = template::load_lenient(path);
        for w in &warnings {
            eprintln!("warning: {}", w);
        }
        tpl
    };

    let mut session = Session::new(tpl, hex).context("reading hex buffer")?;
    session.select_struct(struct_name)?;

    for word in 0..session.buffer().word_count() {
        println!("DWORD {:<3} {}", word, word_hex(session.buffer(), word)?);
    }

    println!();
    println!("[{}]", struct_name);
    if strict {
        for row in session.decode()? {
            println!("  {:<24} {:>9}  {}", row.name, offset_text(&row.range), row.value);
        }
    } else {
        let report = session.decode_report()?;
        for row in &report.rows {
            println!("  {:<24} {:>9}  {}", row.name, offset_text(&row.range), row.value);
        }
        for r in &report.rejected {
            println!(
                "  {:<24} {:>9}  error: {}",
                r.name,
                offset_text(&r.range),
                r.reason
            );
        }
    }
    Ok(())
}

fn offset_text(range: &OffsetRange) -> String {
    if range.is_single_bit() {
        range.start.to_string()
    } else {
        format!("{}:{}", range.start, range.end)
    }
}
