use std::path::PathBuf;

use anyhow::Context;
use rawdraw::{export, Scene};

const DEFAULT_OUTPUT: &str = "out.png";

/// Command line options
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    scene: Option<PathBuf>,
    output: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    help: bool,
}

fn print_help() {
    println!("Usage: rawdraw [OPTIONS] <SCENE>");
    println!();
    println!("Renders a JSON scene of circles and polylines to a PNG file.");
    println!();
    println!("Options:");
    println!(
        "  --output P, -o P          Output PNG path (default: {})",
        DEFAULT_OUTPUT
    );
    println!("  --width W, -w W           Override the scene width");
    println!("  --height H, -h H          Override the scene height");
    println!("  --resolution WxH, -r WxH  Override both (e.g., 640x480)");
    println!("  --help                    Show this help message");
    println!();
    println!("Set RUST_LOG=debug to trace individual draw calls.");
}

/// Parse `WxH`
fn parse_resolution(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// Value following the flag at `args[i]`
fn option_value(args: &[String], i: usize) -> anyhow::Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("missing value for {}", args[i]))
}

/// Parse command line arguments (without the program name)
fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" => options.help = true,
            "--output" | "-o" => {
                options.output = Some(PathBuf::from(option_value(args, i)?));
                i += 1;
            },
            "--width" | "-w" => {
                let v = option_value(args, i)?;
                options.width =
                    Some(v.parse::<u32>().with_context(|| format!("invalid width '{}'", v))?);
                i += 1;
            },
            "--height" | "-h" => {
                let v = option_value(args, i)?;
                options.height =
                    Some(v.parse::<u32>().with_context(|| format!("invalid height '{}'", v))?);
                i += 1;
            },
            "--resolution" | "-r" => {
                let v = option_value(args, i)?;
                let (w, h) = parse_resolution(v)
                    .with_context(|| format!("invalid resolution '{}', expected WxH", v))?;
                options.width = Some(w);
                options.height = Some(h);
                i += 1;
            },
            flag if flag.starts_with('-') => anyhow::bail!("unknown option {}", flag),
            path => {
                if options.scene.is_some() {
                    anyhow::bail!("only one scene file may be given, got extra '{}'", path);
                }
                options.scene = Some(PathBuf::from(path));
            },
        }
        i += 1;
    }

    Ok(options)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;
    if options.help {
        print_help();
        return Ok(());
    }

    let Some(scene_path) = options.scene else {
        print_help();
        anyhow::bail!("no scene file given");
    };

    let mut scene = Scene::load(&scene_path)?;
    if options.width.is_some() || options.height.is_some() {
        let width = options.width.unwrap_or(scene.width);
        let height = options.height.unwrap_or(scene.height);
        log::info!(
            "overriding canvas {}x{} with {}x{}",
            scene.width,
            scene.height,
            width,
            height
        );
        scene.resize(width, height)?;
    }

    let bitmap = scene.render()?;
    let output = options
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    export::save_png(&bitmap, &output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_full_command_line() {
        let options =
            parse_args(&args(&["scene.json", "-o", "shot.png", "-r", "320x200"])).unwrap();
        assert_eq!(
            options,
            Options {
                scene: Some(PathBuf::from("scene.json")),
                output: Some(PathBuf::from("shot.png")),
                width: Some(320),
                height: Some(200),
                help: false,
            }
        );
    }

    #[test]
    fn test_parse_single_dimension() {
        let options = parse_args(&args(&["--height", "50", "a.json"])).unwrap();
        assert_eq!(options.height, Some(50));
        assert_eq!(options.width, None);
        assert_eq!(options.scene, Some(PathBuf::from("a.json")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["-w"])).is_err());
        assert!(parse_args(&args(&["-w", "wide"])).is_err());
        assert!(parse_args(&args(&["-r", "640by480"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("1920x1080"), Some((1920, 1080)));
        assert_eq!(parse_resolution("1920"), None);
        assert_eq!(parse_resolution("x10"), None);
    }
}
