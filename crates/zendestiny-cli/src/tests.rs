use clap::Parser as _;

use super::*;

const BIRTH: [&str; 8] = [
    "--date",
    "1990-06-15",
    "--time",
    "08:30",
    "--gender",
    "male",
    "--place",
    "Shanghai",
];

#[test]
fn parses_chart_command() {
    let mut args = vec!["zendestiny", "chart"];
    args.extend(BIRTH);
    let cli = Cli::try_parse_from(args).expect("expected valid cli args");

    match cli.command {
        Commands::Chart { birth, save } => {
            assert_eq!(birth.date, "1990-06-15");
            assert_eq!(birth.place, "Shanghai");
            assert!(!save);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_chart_with_save_flag() {
    let mut args = vec!["zendestiny", "chart"];
    args.extend(BIRTH);
    args.push("--save");
    let cli = Cli::try_parse_from(args).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Chart { save: true, .. }));
}

#[test]
fn parses_fortune_with_refresh_and_lang() {
    let mut args = vec!["zendestiny", "fortune"];
    args.extend(BIRTH);
    args.extend(["--refresh", "--lang", "en"]);
    let cli = Cli::try_parse_from(args).expect("expected valid cli args");

    match cli.command {
        Commands::Fortune { refresh, lang, .. } => {
            assert!(refresh);
            assert_eq!(lang.as_deref(), Some("en"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_profiles_list() {
    let cli = Cli::try_parse_from(["zendestiny", "profiles", "list"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Profiles {
            command: ProfilesCommands::List
        }
    ));
}

#[test]
fn parses_profiles_delete_with_id() {
    let cli = Cli::try_parse_from(["zendestiny", "profiles", "delete", "abc"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Profiles {
            command: ProfilesCommands::Delete { id },
        } => assert_eq!(id, "abc"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn chart_requires_all_birth_fields() {
    assert!(Cli::try_parse_from(["zendestiny", "chart", "--date", "1990-06-15"]).is_err());
}
