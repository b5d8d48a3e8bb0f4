#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_project_dir;
    use crate::cli::Cli;
    use crate::env::Mode;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["packle"]).unwrap();
        assert!(!cli.production);
        assert!(!cli.watch);
        assert!(cli.cwd.is_none());
        assert_eq!(cli.mode(), Mode::Development);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["packle", "-p", "-w"]).unwrap();
        assert!(cli.production);
        assert!(cli.watch);
        assert_eq!(cli.mode(), Mode::Production);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from(["packle", "--production", "--watch"]).unwrap();
        assert!(cli.production);
        assert!(cli.watch);
    }

    #[test]
    fn test_verbose_quiet_conflict() {
        let result = Cli::try_parse_from(["packle", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cwd_must_be_a_directory() {
        let result = Cli::try_parse_from(["packle", "--cwd", "/definitely/not/here"]);
        assert!(result.is_err());

        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["packle", "--cwd", dir]).unwrap();
        assert_eq!(cli.cwd, Some(temp.path().canonicalize().unwrap()));
    }

    #[test]
    fn test_parse_project_dir_rejects_files() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("package.json");
        std::fs::write(&file, "{}").unwrap();

        assert!(parse_project_dir(file.to_str().unwrap()).is_err());
        assert!(parse_project_dir("").is_err());
    }
}
