use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use readium_navigator::{EpubNavigator, EpubNavigatorConfig, FontDeclarations};
use readium_preferences::epub::{EpubLayout, EpubPreferences, EpubPublicationContext, Language};
use readium_preferences::Configurable;

#[derive(Clone, Debug)]
struct Args {
    input: String,
    layout: EpubLayout,
    language: Option<Language>,
    print_settings: bool,
}

fn main() -> ExitCode {
    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", help_text());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let cli = parse_args(args)?;
    let json = read_input(&cli.input)?;
    let preferences = EpubPreferences::from_json(&json).map_err(|err| err.to_string())?;

    let mut navigator = EpubNavigator::new(
        EpubPublicationContext::new(cli.language, None),
        cli.layout,
        EpubNavigatorConfig {
            font_declarations: FontDeclarations::readium_defaults(),
            ..EpubNavigatorConfig::default()
        },
    );
    navigator.submit_preferences(preferences);

    if cli.print_settings {
        let settings = serde_json::to_string_pretty(navigator.settings())
            .map_err(|err| format!("failed to encode settings: {}", err))?;
        println!("{}", settings);
        return Ok(());
    }
    if let Some(style) = navigator.inline_style() {
        print!("{}", style);
    }
    Ok(())
}

fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut json = String::new();
        io::stdin()
            .read_to_string(&mut json)
            .map_err(|err| format!("failed to read stdin: {}", err))?;
        return Ok(json);
    }
    fs::read_to_string(path).map_err(|err| format!("failed to read {}: {}", path, err))
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h") {
        return Err("help requested".to_string());
    }

    let mut input = None;
    let mut cfg = Args {
        input: String::new(),
        layout: EpubLayout::Reflowable,
        language: None,
        print_settings: false,
    };

    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--layout" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--layout requires a value".to_string())?;
                cfg.layout = match v.as_str() {
                    "reflowable" => EpubLayout::Reflowable,
                    "fixed" => EpubLayout::Fixed,
                    other => return Err(format!("unknown layout: {}", other)),
                };
                i += 2;
            }
            "--language" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--language requires a value".to_string())?;
                cfg.language = Some(Language::new(v.clone()));
                i += 2;
            }
            "--settings" => {
                cfg.print_settings = true;
                i += 1;
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {}", other));
            }
            other => {
                if input.is_some() {
                    return Err(format!("unexpected argument: {}", other));
                }
                input = Some(other.to_string());
                i += 1;
            }
        }
    }

    cfg.input = input.ok_or_else(|| "missing preferences path".to_string())?;
    Ok(cfg)
}

fn help_text() -> &'static str {
    r#"readium-css - print the ReadiumCSS inline style for EPUB preferences

USAGE:
  cargo run -p readium-navigator --bin readium-css -- [options] <preferences.json|->

OPTIONS:
  --layout <reflowable|fixed>  publication layout (default: reflowable)
  --language <tag>             publication language, e.g. ja or ar-EG
  --settings                   print resolved settings as JSON instead of CSS
  -h, --help                   show this help
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("readium-css")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parses_options_and_input() {
        let cli = parse_args(args(&["--layout", "fixed", "--language", "ja", "prefs.json"]))
            .unwrap();
        assert_eq!(cli.layout, EpubLayout::Fixed);
        assert_eq!(cli.language, Some(Language::from("ja")));
        assert_eq!(cli.input, "prefs.json");
        assert!(!cli.print_settings);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--layout"])).is_err());
        assert!(parse_args(args(&["--layout", "scrolled", "-"])).is_err());
        assert!(parse_args(args(&["a.json", "b.json"])).is_err());
        assert!(parse_args(args(&["--verbose", "a.json"])).is_err());
    }
}
