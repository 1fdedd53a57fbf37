use super::*;

#[test]
fn parses_fetch_without_timeframes() {
    let cli = Cli::try_parse_from(["ghtrend", "fetch"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Fetch { ref timeframes } if timeframes.is_empty()
    ));
}

#[test]
fn parses_repeated_timeframes() {
    let cli = Cli::try_parse_from([
        "ghtrend",
        "fetch",
        "--timeframe",
        "daily",
        "-t",
        "Monthly",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Fetch { timeframes } => {
            assert_eq!(timeframes, vec![Timeframe::Daily, Timeframe::Monthly]);
        }
        other => panic!("expected fetch, got {other:?}"),
    }
}

#[test]
fn rejects_unknown_timeframe() {
    let result = Cli::try_parse_from(["ghtrend", "fetch", "--timeframe", "yearly"]);
    assert!(result.is_err());
}

#[test]
fn parses_report_defaults() {
    let cli = Cli::try_parse_from(["ghtrend", "report"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Report {
            date: None,
            no_translate: false,
            stdout: false
        }
    ));
}

#[test]
fn parses_report_with_date_and_flags() {
    let cli = Cli::try_parse_from([
        "ghtrend",
        "report",
        "--date",
        "2025-06-09",
        "--no-translate",
        "--stdout",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Report {
            date: Some(d),
            no_translate: true,
            stdout: true
        } if d == NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    ));
}

#[test]
fn rejects_malformed_report_date() {
    let result = Cli::try_parse_from(["ghtrend", "report", "--date", "09/06/2025"]);
    assert!(result.is_err());
}

#[test]
fn parses_run() {
    let cli = Cli::try_parse_from(["ghtrend", "run", "--no-translate"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Run { no_translate: true }));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["ghtrend"]).is_err());
}
