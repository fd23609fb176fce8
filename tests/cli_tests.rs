//! Argument parsing and configuration precedence
use clap::Parser;
use std::path::Path;
use tempfile::TempDir;
use weeknote::{
    App, Args, Config, FileConfig, Mode, NoteError, parse_week_offset, relative_work_week_from,
};

#[test]
fn test_offsets() {
    assert_eq!(parse_week_offset("-12").unwrap(), -12);
    assert_eq!(parse_week_offset("+3").unwrap(), 3);
    assert!(matches!(
        parse_week_offset("7"),
        Err(NoteError::InvalidOffset(v)) if v == "7"
    ));
}

#[test]
fn test_flags_override_file_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "base_dir = \"/srv/notes\"\neditor = \"nano\"\n").unwrap();

    let mut config = Config::defaults("note", Some(Path::new("/home/ann")), Some("vi".into()));
    config.merge_file(FileConfig::load(&path).unwrap().unwrap());
    assert_eq!(config.editor, "nano");

    let args = Args::try_parse_from(["note", "-1", "-e", "nvim", "-m"]).unwrap();
    args.apply(&mut config);

    assert_eq!(config.base_dir, Path::new("/srv/notes"));
    assert_eq!(config.editor, "nvim");
    assert_eq!(args.week_offset(), -1);
    assert_eq!(args.mode(), Mode::Render);
}

#[test]
fn test_conflicting_modes() {
    assert!(Args::try_parse_from(["note", "-n", "-p"]).is_err());
    assert!(Args::try_parse_from(["note", "-p", "-m"]).is_err());
}

#[test]
fn test_absolute_week_is_reserved() {
    let err = Args::try_parse_from(["note", "23"]).unwrap_err();
    assert!(err.to_string().contains("unable to parse offset value"));
}

#[test]
fn test_huge_offset_is_an_error_not_a_panic() {
    let offset = parse_week_offset("+999999999999").unwrap();
    let now = chrono::NaiveDate::from_ymd_opt(2021, 4, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    assert!(matches!(
        relative_work_week_from(now, offset),
        Err(NoteError::OffsetOutOfRange(o)) if o == offset
    ));

    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        base_dir: temp_dir.path().to_path_buf(),
        editor: String::new(),
        sync_git: false,
    };
    let err = App::new(config, offset, Mode::Names)
        .with_now(now)
        .run(&mut Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("out of range"), "{err:#}");
}
