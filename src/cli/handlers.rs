// FILE: src/cli/handlers.rs
use super::{OutputFormat, PayloadKind, TilecCli};
use crate::{
    parse_file, read_payload, resolve_presentation, ElementVariant, ParseContext, ParseResult,
    Result, Severity, Tile, TileDefaults, TileError, TileSize, TileUpdater,
};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Instant;

fn input_arg(matches: &clap::ArgMatches) -> Result<&str> {
    matches
        .get_one::<String>("input")
        .map(String::as_str)
        .ok_or_else(|| TileError::invalid_format("No input file given"))
}

fn print_issues(result: &ParseResult) {
    for issue in result.issues() {
        let icon = match issue.severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️ ",
        };
        println!("   {} {}", icon, issue);
    }
}

fn unrenderable(input_path: &str, result: &ParseResult) -> TileError {
    TileError::Unrenderable {
        file: input_path.to_string(),
        errors: result.error_count(),
        warnings: result.warning_count(),
    }
}

// --- CHECK ---
pub fn handle_check_command(cli: &TilecCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = input_arg(matches)?;
    let recursive = matches.get_flag("recursive");
    let notification_type = matches.get_one::<PayloadKind>("type").map(|kind| (*kind).into());
    let context = cli.config().parse_context(notification_type)?;
    let deny_warnings =
        matches.get_flag("deny-warnings") || cli.config().deny_warnings.unwrap_or(false);

    if recursive && Path::new(input_path).is_dir() {
        check_directory_recursive(input_path, &context, deny_warnings)
    } else {
        check_single_file(input_path, &context, deny_warnings)
    }
}

fn check_single_file(input_path: &str, context: &ParseContext, deny_warnings: bool) -> Result<()> {
    println!("🔍 Checking {}", input_path);
    let result = parse_file(input_path, context)?;
    print_issues(&result);

    let failed = !result.is_ok_for_render() || (deny_warnings && result.warning_count() > 0);
    if failed {
        let err = unrenderable(input_path, &result);
        println!("❌ {}", err);
        return Err(err);
    }

    if result.issues().is_empty() {
        println!("✅ {} - No issues found", input_path);
    } else {
        println!("✅ {} - Renderable with {} warning(s)", input_path, result.warning_count());
    }
    Ok(())
}

fn check_directory_recursive(dir_path: &str, context: &ParseContext, deny_warnings: bool) -> Result<()> {
    let mut total_files = 0;
    let mut error_files = 0;

    for entry in walkdir::WalkDir::new(dir_path) {
        let entry = entry.map_err(|e| {
            TileError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Directory traversal error: {}", e),
            ))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_xml = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if !is_xml {
            continue;
        }

        total_files += 1;
        let path = entry.path().to_string_lossy();
        if let Err(e) = check_single_file(&path, context, deny_warnings) {
            log::debug!("{}: {}", path, e);
            error_files += 1;
        }
    }

    println!("\n📊 Check Summary:");
    println!("   Total files: {}", total_files);
    println!("   Files with errors: {}", error_files);
    if total_files > 0 {
        println!(
            "   Success rate: {:.1}%",
            (total_files - error_files) as f64 / total_files as f64 * 100.0
        );
    }

    if error_files > 0 {
        Err(TileError::invalid_format(format!(
            "{} of {} files failed the check",
            error_files, total_files
        )))
    } else {
        Ok(())
    }
}

// --- RENDER ---
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderReport {
    size: &'static str,
    display_name: String,
    show_name: bool,
    show_corner_logo: bool,
    branding_visible: bool,
    binding: Option<serde_json::Value>,
}

pub fn handle_render_command(cli: &TilecCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = input_arg(matches)?;
    let size = cli.tile_size(matches)?;
    let format = matches
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or(OutputFormat::Json);
    let has_badge = matches.get_flag("badge");

    let context = cli.config().parse_context(None)?;
    let result = parse_file(input_path, &context)?;
    print_issues(&result);

    if !result.is_ok_for_render() {
        return Err(unrenderable(input_path, &result));
    }

    let output = render(result.tile(), size, &cli.config().tile_defaults(), has_badge, format)?;
    println!("{}", output);
    Ok(())
}

fn render(
    tile: Option<&Tile>,
    size: TileSize,
    defaults: &TileDefaults,
    has_badge: bool,
    format: OutputFormat,
) -> Result<String> {
    let presentation = resolve_presentation(tile, size, defaults, has_badge);

    match format {
        OutputFormat::Json => {
            let report = RenderReport {
                size: size.name(),
                display_name: presentation.display_name.clone(),
                show_name: presentation.show_name,
                show_corner_logo: presentation.show_corner_logo,
                branding_visible: presentation.branding_visible,
                binding: presentation
                    .binding
                    .map(|binding| binding.convert_to_object().to_json()),
            };
            serde_json::to_string_pretty(&report)
                .map_err(|e| TileError::invalid_format(format!("JSON serialization error: {}", e)))
        }
        OutputFormat::Debug => Ok(format!("Presentation at {} size:\n\n{:#?}", size, presentation)),
    }
}

// --- WATCH ---
pub fn handle_watch_command(cli: &TilecCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = input_arg(matches)?;
    let size = cli.tile_size(matches)?;
    let defaults = cli.config().tile_defaults();
    let mut updater = TileUpdater::new(cli.config().parse_context(None)?);

    println!("👀 Watching {} for changes...", input_path);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if let Err(e) = tx.send(event) {
                    eprintln!("Watch error: {}", e);
                }
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| TileError::watch(format!("Failed to create file watcher: {}", e)))?;

    watcher
        .watch(Path::new(input_path), RecursiveMode::NonRecursive)
        .map_err(|e| TileError::watch(format!("Failed to watch file: {}", e)))?;

    refresh(&mut updater, input_path, size, &defaults);

    loop {
        match rx.recv() {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    continue;
                }
                println!("🔄 File changed, re-parsing...");
                refresh(&mut updater, input_path, size, &defaults);
            }
            Err(e) => {
                eprintln!("Watch error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Feed the file through the updater and show whatever tile is active afterwards.
fn refresh(updater: &mut TileUpdater, input_path: &str, size: TileSize, defaults: &TileDefaults) {
    let started = Instant::now();
    let xml = match read_payload(input_path) {
        Ok(xml) => xml,
        Err(e) => {
            eprintln!("❌ {}", e);
            return;
        }
    };

    let result = updater.update(&xml);
    print_issues(&result);
    if result.is_ok_for_render() {
        println!("✅ Parsed in {:.2}ms", started.elapsed().as_secs_f64() * 1000.0);
    } else {
        println!("❌ {}; showing the previous tile", unrenderable(input_path, &result));
    }

    let current = updater.current();
    match render(current.as_deref(), size, defaults, false, OutputFormat::Json) {
        Ok(output) => println!("{}", output),
        Err(e) => eprintln!("❌ {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PAYLOAD: &str = r#"<tile><visual displayName="Mail" branding="name"><binding template="TileWide"><text>{subject}</text></binding></visual></tile>"#;

    #[test]
    fn test_check_single_file() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.xml");
        fs::write(&good, PAYLOAD).unwrap();
        let noisy = dir.path().join("noisy.xml");
        fs::write(&noisy, PAYLOAD.replace("<text>", "<text color=\"red\">")).unwrap();

        let context = ParseContext::tile();
        assert!(check_single_file(good.to_str().unwrap(), &context, true).is_ok());
        assert!(check_single_file(noisy.to_str().unwrap(), &context, false).is_ok());
        assert!(matches!(
            check_single_file(noisy.to_str().unwrap(), &context, true),
            Err(TileError::Unrenderable { warnings: 1, .. })
        ));
    }

    #[test]
    fn test_check_directory_recursive() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("a.xml"), PAYLOAD).unwrap();
        fs::write(nested.join("b.XML"), "<tile/>").unwrap();
        fs::write(nested.join("notes.txt"), "ignored").unwrap();

        let err = check_directory_recursive(dir.path().to_str().unwrap(), &ParseContext::tile(), false)
            .unwrap_err();
        assert!(err.to_string().contains("1 of 2 files"));
    }

    #[test]
    fn test_render_json_report() {
        let result = crate::parse_tile(PAYLOAD);
        let output = render(
            result.tile(),
            TileSize::Wide,
            &TileDefaults::new("Fallback"),
            false,
            OutputFormat::Json,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["size"], "wide");
        assert_eq!(json["displayName"], "Mail");
        assert_eq!(json["showName"], true);
        assert_eq!(json["showCornerLogo"], false);
        assert_eq!(json["binding"]["children"][0]["bindings"]["Text"], "subject");
    }

    #[test]
    fn test_render_without_matching_binding() {
        let result = crate::parse_tile(PAYLOAD);
        let output = render(
            result.tile(),
            TileSize::Small,
            &TileDefaults::new("Fallback"),
            true,
            OutputFormat::Json,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["displayName"], "Fallback");
        assert!(json["binding"].is_null());
        assert_eq!(json["brandingVisible"], true);
    }
}
