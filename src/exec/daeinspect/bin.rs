use std::{env, path::PathBuf, process};

use daetex::editor::session::ModelSession;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "daeinspect".to_string());

    let rest: Vec<String> = args.collect();
    if rest.is_empty() {
        print_usage(&program);
        return Err("missing DAE file path".to_string());
    }

    let mut path: Option<PathBuf> = None;
    let mut offset_override: Option<PathBuf> = None;

    let mut iter = rest.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            "--offset" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--offset requires a relative path".to_string())?;
                offset_override = Some(PathBuf::from(value));
            }
            _ => {
                if path.is_none() {
                    path = Some(PathBuf::from(arg));
                } else {
                    print_usage(&program);
                    return Err(format!("unexpected argument: {arg}"));
                }
            }
        }
    }

    let Some(path) = path else {
        print_usage(&program);
        return Err("missing DAE file path".to_string());
    };

    let mut session = ModelSession::open(&path)
        .map_err(|err| format!("failed to open {}: {err}", path.display()))?;
    if let Some(offset) = offset_override {
        session.set_texture_root_offset(offset);
    }

    println!("Model: {}", session.path().display());
    println!(
        "Namespace: {}",
        session.document().namespace().unwrap_or("(none)")
    );
    println!(
        "Texture root offset: {}",
        session.config().offset().display()
    );

    let resolved = session.resolved_textures();
    println!("Linked textures: {}", resolved.len());

    if resolved.is_empty() {
        println!("(no channel/image pairs)");
        return Ok(());
    }

    println!(
        "\n{:<12}  {:<16}  {}",
        "Channel", "Image id", "Resolved path"
    );
    println!("{:-<12}  {:-<16}  {:-<40}", "", "", "");
    for entry in &resolved {
        let exists = if entry.path.exists() { "" } else { "  (missing)" };
        println!(
            "{:<12}  {:<16}  {}{exists}",
            entry.linked.channel.to_string(),
            entry.linked.image_id,
            entry.path.display()
        );
    }
    println!("\nStored values:");
    for entry in &resolved {
        println!("  {}: {}", entry.linked.channel, entry.linked.stored);
    }

    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage: {program} <DAE_FILE> [--offset <PATH>]");
    println!("\nOptions:");
    println!("  --offset <PATH>  Resolve relative texture paths below <model-dir>/<PATH>");
    println!("                   (overrides daetex.json; default ../..)");
    println!("  -h, --help       Show this help message");
}
