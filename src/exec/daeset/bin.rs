use std::{env, path::PathBuf, process};

use daetex::{BindAction, TextureChannel, editor::session::ModelSession};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "daeset".to_string());

    let mut positional: Vec<String> = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() != 3 {
        print_usage(&program);
        return Err(format!(
            "expected <DAE_FILE> <CHANNEL> <IMAGE_FILE>, got {} argument(s)",
            positional.len()
        ));
    }

    let model = PathBuf::from(&positional[0]);
    let channel: TextureChannel = positional[1].parse()?;
    let texture = PathBuf::from(&positional[2]);

    let mut session = ModelSession::open(&model)
        .map_err(|err| format!("failed to open {}: {err}", model.display()))?;
    let report = session
        .bind(channel, &texture)
        .map_err(|err| format!("failed to bind {channel}: {err}"))?;

    let verb = match report.action {
        BindAction::Inserted => "added",
        BindAction::Replaced => "replaced",
    };
    println!(
        "{verb} {} binding (image id {}) in {}",
        report.channel,
        report.image_id,
        session.path().display()
    );
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage: {program} <DAE_FILE> <CHANNEL> <IMAGE_FILE>");
    println!("\nChannels:");
    for channel in TextureChannel::ALL {
        println!("  {channel}");
    }
    println!("\nBinds the image to the phong channel and saves the model in place.");
}
