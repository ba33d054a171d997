use serde::Serialize;
use yarn_builder::{yarn_available, YarnOptions};

#[derive(Serialize)]
struct CheckReport {
    program: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

pub fn run(options: &YarnOptions, json: bool) -> anyhow::Result<i32> {
    let program = options.program_name().display().to_string();
    let resolved = yarn_available(options);

    if json {
        let report = CheckReport {
            program: program.clone(),
            found: resolved.is_some(),
            path: resolved.as_ref().map(|p| p.display().to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &resolved {
            Some(path) => println!("{} found at {}", program, path.display()),
            None => eprintln!("{program} not found on PATH"),
        }
    }

    Ok(if resolved.is_some() { 0 } else { 1 })
}
