use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    Cli::command().debug_assert();
}

#[test]
fn run_with_overrides() {
    let cli = Cli::try_parse_from([
        "cw",
        "run",
        "--batch-size",
        "500",
        "--database",
        ":memory:",
        "-v",
    ])
    .unwrap();

    assert!(cli.global.verbose);
    assert_eq!(cli.global.database.as_deref(), Some(":memory:"));
    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.batch_size, Some(500));
            assert!(!args.no_refresh);
            assert!(args.results.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_config_before_subcommand() {
    let cli = Cli::try_parse_from(["cw", "--config", "conf/cw.yml", "stats"]).unwrap();
    assert_eq!(cli.global.config, Some(PathBuf::from("conf/cw.yml")));
    assert!(matches!(cli.command, Commands::Stats));
}

#[test]
fn check_flags() {
    let cli = Cli::try_parse_from(["cw", "check", "--skip-reference-check"]).unwrap();
    match cli.command {
        Commands::Check(args) => assert!(args.skip_reference_check),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn batch_size_must_be_numeric() {
    assert!(Cli::try_parse_from(["cw", "run", "--batch-size", "many"]).is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["cw"]).is_err());
}
