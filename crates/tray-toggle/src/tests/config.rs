use crate::{AppError, Cli, LaunchConfig};

// /bin/sh exists on every platform these tests run on.
const REAL_COMMAND: &str = "/bin/sh";

const BLUE: [u8; 4] = [0, 0, 255, 255];
const YELLOW: [u8; 4] = [255, 255, 0, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 128, 0, 255];

fn base_cli(command: &[&str]) -> Cli {
    Cli {
        tooltip: None,
        id_char: None,
        bg_color: "blue".into(),
        font_color: "yellow".into(),
        stopped_dot_color: "red".into(),
        running_dot_color: "green".into(),
        stopped_font_color: None,
        running_font_color: None,
        stopped_bg_color: None,
        running_bg_color: None,
        start_now: false,
        command: command.iter().map(|s| s.to_string()).collect(),
    }
}

/// WHAT: Every invalid color is reported, not just the first
/// WHY: A user fixing their flags should see the whole list in one run
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_bad_colors_when_validating_then_both_are_reported() {
    // Given: Two broken color values among valid ones
    let mut cli = base_cli(&[REAL_COMMAND]);
    cli.bg_color = "notacolor".into();
    cli.running_dot_color = "alsonotacolor".into();

    // When: Building the configuration
    let errors = LaunchConfig::from_cli(cli).err().unwrap();

    // Then: Both flags are named, nothing else is
    assert_eq!(errors.len(), 2);
    assert!(matches!(
        &errors[0],
        AppError::InvalidColor { flag, value, .. }
            if flag == "--bg-color" && value == "notacolor"
    ));
    assert!(matches!(
        &errors[1],
        AppError::InvalidColor { flag, .. } if flag == "--running-dot-color"
    ));
}

/// WHAT: An empty command vector fails validation
/// WHY: There is nothing to supervise without a command
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_command_when_validating_then_missing_command_error() {
    let cli = base_cli(&[]);

    let errors = LaunchConfig::from_cli(cli).err().unwrap();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], AppError::MissingCommand { .. }));
}

/// WHAT: An executable that exists nowhere fails validation
/// WHY: Catch typos before showing a tray icon for a command that can never run
#[test]
#[allow(clippy::unwrap_used)]
fn given_unlocatable_executable_when_validating_then_not_found_error() {
    let cli = base_cli(&["/no/such/dir/tray-toggle-test-missing"]);

    let errors = LaunchConfig::from_cli(cli).err().unwrap();

    assert!(matches!(
        &errors[0],
        AppError::CommandNotFound { path, .. } if path == "/no/such/dir/tray-toggle-test-missing"
    ));
}

/// WHAT: A bad exact path falls back to the same file name in the cwd
/// WHY: Lets users launch a script sitting next to where they invoked the tool
#[test]
#[allow(clippy::unwrap_used)]
fn given_file_present_in_cwd_when_exact_path_missing_then_fallback_rewrites_command() {
    // Given: A wrong directory prefix on a file that exists in the cwd
    // (cargo runs tests from the package root, where Cargo.toml lives)
    let cli = base_cli(&["/no/such/dir/Cargo.toml", "arg"]);

    // When: Building the configuration
    let config = LaunchConfig::from_cli(cli).unwrap();

    // Then: The executable was rewritten to the cwd copy, args untouched
    assert!(config.command[0].ends_with("Cargo.toml"));
    assert_ne!(config.command[0], "/no/such/dir/Cargo.toml");
    assert!(std::path::Path::new(&config.command[0]).exists());
    assert_eq!(config.command[1], "arg");
}

/// WHAT: Tooltip and glyph derive from the executable name when unset
/// WHY: The icon must be identifiable without any optional flags
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_tooltip_or_glyph_when_validating_then_derived_from_executable() {
    let cli = base_cli(&[REAL_COMMAND]);

    let config = LaunchConfig::from_cli(cli).unwrap();

    assert_eq!(config.tooltip, "sh");
    assert_eq!(config.glyph, 'S');
    assert!(!config.autostart);
}

/// WHAT: Explicit tooltip and glyph are taken as given
/// WHY: A supplied glyph is not case-mangled, only the derived one is
#[test]
#[allow(clippy::unwrap_used)]
fn given_explicit_tooltip_and_glyph_when_validating_then_used_verbatim() {
    let mut cli = base_cli(&[REAL_COMMAND]);
    cli.tooltip = Some("My Monitor".into());
    cli.id_char = Some("z".into());
    cli.start_now = true;

    let config = LaunchConfig::from_cli(cli).unwrap();

    assert_eq!(config.tooltip, "My Monitor");
    assert_eq!(config.glyph, 'z');
    assert!(config.autostart);
}

/// WHAT: A multi-character glyph option is rejected
/// WHY: The icon has room for exactly one identifying character
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_char_glyph_when_validating_then_invalid_glyph_error() {
    let mut cli = base_cli(&[REAL_COMMAND]);
    cli.id_char = Some("ab".into());

    let errors = LaunchConfig::from_cli(cli).err().unwrap();

    assert!(matches!(
        &errors[0],
        AppError::InvalidGlyph { value, .. } if value == "ab"
    ));
}

/// WHAT: Per-state overrides apply only where given, globals fill the rest
/// WHY: The fallback chain is the whole point of the six color flags
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_overrides_when_validating_then_fallback_to_globals() {
    let mut cli = base_cli(&[REAL_COMMAND]);
    cli.running_bg_color = Some("aquamarine".into());
    cli.stopped_font_color = Some("#aaf".into());

    let config = LaunchConfig::from_cli(cli).unwrap();

    // Overridden slots
    assert_eq!(config.colors.running.background, [127, 255, 212, 255]);
    assert_eq!(config.colors.stopped.font, [170, 170, 255, 255]);

    // Everything else falls back to globals and dot defaults
    assert_eq!(config.colors.stopped.background, BLUE);
    assert_eq!(config.colors.running.font, YELLOW);
    assert_eq!(config.colors.running.dot, GREEN);
    assert_eq!(config.colors.stopped.dot, RED);
}
