use chrono::NaiveDate;
use earthguard_core::{CategoryTag, SortKey};

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["earthguard"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_one_shot_question() {
    let cli = Cli::try_parse_from(["earthguard", "ask", "Can I recycle pizza boxes?"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Ask {
            question: Some(ref q),
            suggestions: false
        }) if q == "Can I recycle pizza boxes?"
    ));
}

#[test]
fn ask_without_question_is_interactive() {
    let cli = Cli::try_parse_from(["earthguard", "ask"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Ask {
            question: None,
            suggestions: false
        })
    ));
}

#[test]
fn ask_suggestions_flag() {
    let cli = Cli::try_parse_from(["earthguard", "ask", "--suggestions"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Ask {
            suggestions: true,
            ..
        })
    ));
}

#[test]
fn centers_defaults() {
    let cli = Cli::try_parse_from(["earthguard", "centers"]).unwrap();
    let Some(Commands::Centers(args)) = cli.command else {
        panic!("expected centers command");
    };
    assert_eq!(args.category, "all");
    assert_eq!(args.search, "");
    assert_eq!(args.sort, SortKey::Distance);
    assert!(args.lat.is_none());
    assert!(!args.directions);
}

#[test]
fn centers_with_filters_and_sort() {
    let cli = Cli::try_parse_from([
        "earthguard",
        "centers",
        "--category",
        "electronics",
        "--search",
        "midc",
        "--sort",
        "rating",
        "--directions",
    ])
    .unwrap();
    let Some(Commands::Centers(args)) = cli.command else {
        panic!("expected centers command");
    };
    assert_eq!(args.category, "electronics");
    assert_eq!(args.search, "midc");
    assert_eq!(args.sort, SortKey::Rating);
    assert!(args.directions);
}

#[test]
fn centers_rejects_unknown_sort() {
    let result = Cli::try_parse_from(["earthguard", "centers", "--sort", "popularity"]);
    assert!(result.is_err());
}

#[test]
fn centers_position_needs_both_coordinates() {
    assert!(Cli::try_parse_from(["earthguard", "centers", "--lat", "19.99"]).is_err());

    let cli =
        Cli::try_parse_from(["earthguard", "centers", "--lat", "19.99", "--lng", "73.75"]).unwrap();
    let Some(Commands::Centers(args)) = cli.command else {
        panic!("expected centers command");
    };
    assert_eq!(args.lat, Some(19.99));
    assert_eq!(args.lng, Some(73.75));
}

#[test]
fn parses_pickups_list() {
    let cli = Cli::try_parse_from(["earthguard", "pickups", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Pickups {
            command: PickupCommands::List
        })
    ));
}

#[test]
fn parses_pickups_schedule_with_repeated_categories() {
    let cli = Cli::try_parse_from([
        "earthguard",
        "pickups",
        "schedule",
        "--date",
        "2025-07-01",
        "--time",
        "14:00",
        "--category",
        "organic",
        "--category",
        "Hazardous",
        "--address",
        "College Road, Nashik",
    ])
    .unwrap();

    let Some(Commands::Pickups {
        command:
            PickupCommands::Schedule {
                date,
                categories,
                instructions,
                ..
            },
    }) = cli.command
    else {
        panic!("expected pickups schedule command");
    };
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    assert_eq!(categories, vec![CategoryTag::Organic, CategoryTag::Hazardous]);
    assert!(instructions.is_none());
}

#[test]
fn pickups_schedule_requires_a_category() {
    let result = Cli::try_parse_from([
        "earthguard",
        "pickups",
        "schedule",
        "--date",
        "2025-07-01",
        "--time",
        "14:00",
        "--address",
        "College Road",
    ]);
    assert!(result.is_err());
}

#[test]
fn pickups_schedule_rejects_unknown_category() {
    let result = Cli::try_parse_from([
        "earthguard",
        "pickups",
        "schedule",
        "--date",
        "2025-07-01",
        "--time",
        "14:00",
        "--category",
        "glass",
        "--address",
        "College Road",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_pickups_cancel() {
    let cli = Cli::try_parse_from(["earthguard", "pickups", "cancel", "42"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Pickups {
            command: PickupCommands::Cancel { id: 42 }
        })
    ));
}
